//! Error types for the provider client.

use thiserror::Error;

/// Provider client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider has no such entity (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The provider answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A decoded record violates a domain rule
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Any other request failure
    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status == reqwest::StatusCode::NOT_FOUND => {
                    ClientError::NotFound(e.to_string())
                }
                Some(status) => ClientError::Status {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => ClientError::Request(e.to_string()),
            }
        } else {
            ClientError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

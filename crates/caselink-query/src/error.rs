//! Error types for query and assembly operations

use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while querying links or assembling a graph
///
/// None of these are retried by the core. Callers decide whether to ask
/// again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Malformed filter, pagination or depth
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Focal entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The data provider failed or returned unusable data
    #[error("Provider failure: {0}")]
    ProviderFailure(String),
}

impl QueryError {
    pub(crate) fn provider<E: Display>(err: E) -> Self {
        QueryError::ProviderFailure(err.to_string())
    }
}

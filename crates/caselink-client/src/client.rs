//! Case-link provider client implementation.

use crate::dto::{LinkDto, LinkTypeSummaryDto, RecordSetDto};
use crate::error::ClientError;
use caselink_domain::{Link, LinkStrength, LinkType, LinkTypeSummary, RecordSet};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default timeout for provider requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Entity collection a neighborhood can be requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// `/api/cases/{id}`
    Case,
    /// `/api/persons/{id}`
    Person,
}

impl EntityKind {
    /// Path segment of the collection
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Case => "cases",
            EntityKind::Person => "persons",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Case => f.write_str("case"),
            EntityKind::Person => f.write_str("person"),
        }
    }
}

/// Asynchronous client for a case-link provider
///
/// Each call is a single request. Failures are returned as they are; the
/// client never retries.
#[derive(Debug, Clone)]
pub struct CaseLinkClient {
    base_url: String,
    http: reqwest::Client,
}

impl CaseLinkClient {
    /// Create a client for the provider at `base_url`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use caselink_client::CaseLinkClient;
    ///
    /// let client = CaseLinkClient::new("http://localhost:8080").unwrap();
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, http })
    }

    /// Provider base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch links, optionally narrowed by type and minimum strength
    ///
    /// The filter is passed to the provider as a hint; callers re-apply it.
    pub async fn fetch_links(
        &self,
        link_type: Option<LinkType>,
        min_strength: Option<LinkStrength>,
    ) -> Result<Vec<Link>, ClientError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(link_type) = link_type {
            params.push(("link_type", link_type.as_str().to_string()));
        }
        if let Some(min_strength) = min_strength {
            params.push(("min_strength", min_strength.value().to_string()));
        }

        let dtos: Vec<LinkDto> = self.get_json("/api/links", &params).await?;
        dtos.into_iter().map(Link::try_from).collect()
    }

    /// Fetch the provider's per-type link summary
    pub async fn fetch_link_type_summary(&self) -> Result<Vec<LinkTypeSummary>, ClientError> {
        let dtos: Vec<LinkTypeSummaryDto> = self.get_json("/api/links/summary", &[]).await?;
        dtos.into_iter().map(LinkTypeSummary::try_from).collect()
    }

    /// Fetch the records around a case or person
    ///
    /// Returns [`ClientError::NotFound`] when the provider answers 404.
    pub async fn fetch_entity_neighborhood(
        &self,
        kind: EntityKind,
        id: u64,
        depth: usize,
    ) -> Result<RecordSet, ClientError> {
        let path = format!("/api/{}/{}/neighborhood", kind.collection(), id);
        let dto: RecordSetDto = self
            .get_json(&path, &[("depth", depth.to_string())])
            .await
            .map_err(|e| match e {
                ClientError::NotFound(_) => ClientError::NotFound(format!("{} {}", kind, id)),
                other => other,
            })?;
        RecordSet::try_from(dto)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Provider request");

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

//! Raw link filter as supplied by a caller

use crate::QueryError;
use caselink_domain::traits::LinkQuery;
use caselink_domain::{LinkStrength, LinkType};

/// Unvalidated link filter
///
/// Holds the values exactly as a caller typed them. [`LinkFilter::validate`]
/// turns it into a [`LinkQuery`] or rejects it; nothing is clamped or
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkFilter {
    /// Link type wire name (`DNA_MATCH`, `ID_NUMBER`, `EVIDENCE`)
    pub link_type: Option<String>,

    /// Minimum strength, inclusive
    pub min_strength: Option<f64>,
}

impl LinkFilter {
    /// Filter matching every link
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one link type
    pub fn with_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    /// Restrict to links at least this strong
    pub fn with_min_strength(mut self, min_strength: f64) -> Self {
        self.min_strength = Some(min_strength);
        self
    }

    /// Validate into a typed query
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an unknown link type or a threshold
    /// outside [0, 1]
    pub fn validate(&self) -> Result<LinkQuery, QueryError> {
        let link_type = match &self.link_type {
            Some(raw) => Some(LinkType::parse(raw).ok_or_else(|| {
                QueryError::InvalidArgument(format!("Unknown link type: {}", raw))
            })?),
            None => None,
        };

        let min_strength = self
            .min_strength
            .map(LinkStrength::new)
            .transpose()
            .map_err(|e| QueryError::InvalidArgument(format!("min_strength: {}", e)))?;

        Ok(LinkQuery {
            link_type,
            min_strength,
        })
    }
}

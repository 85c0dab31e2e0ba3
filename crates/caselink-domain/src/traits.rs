//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the graph/query logic and the
//! systems that own the records. Implementations live in other crates.

use crate::{
    Case, CaseId, Evidence, Link, LinkId, LinkStrength, LinkType, Person, PersonId,
};

/// Synchronous read access to case, person, evidence and link records
///
/// Implementations must answer promptly from data they already hold or can
/// fetch in one call. A failing call is reported through `Self::Error` and
/// is never retried by the caller.
pub trait CaseRecords {
    /// Error type for provider operations
    type Error;

    /// Links matching a query
    ///
    /// The query is a hint: callers re-check every returned link, so a
    /// provider may return a superset.
    fn links(&self, query: &LinkQuery) -> Result<Vec<Link>, Self::Error>;

    /// Get a case by ID
    fn case(&self, id: CaseId) -> Result<Option<Case>, Self::Error>;

    /// Get a person by ID
    fn person(&self, id: PersonId) -> Result<Option<Person>, Self::Error>;

    /// Links touching a case
    fn links_for_case(&self, id: CaseId) -> Result<Vec<Link>, Self::Error>;

    /// Persons referenced by a case
    fn persons_in_case(&self, id: CaseId) -> Result<Vec<Person>, Self::Error>;

    /// Artifacts held by a case
    fn evidence_for_case(&self, id: CaseId) -> Result<Vec<Evidence>, Self::Error>;

    /// Cases referencing a person
    fn cases_for_person(&self, id: PersonId) -> Result<Vec<Case>, Self::Error>;
}

/// Result of ingesting one link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No link existed for the pair and type; stored under this id
    Inserted(LinkId),
    /// A link already existed; its strength was replaced
    Updated(LinkId),
}

/// Ingestion boundary for links produced by a matching process
///
/// At most one link exists per unordered case pair and link type. Ingesting
/// a link whose key is already present updates the stored strength and
/// keeps the stored id.
pub trait LinkIngest {
    /// Error type for ingestion
    type Error;

    /// Insert a link or update the existing one with the same key
    fn upsert_link(&mut self, link: Link) -> Result<UpsertOutcome, Self::Error>;
}

/// Validated link query criteria
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkQuery {
    /// Only links of this type (all types when `None`)
    pub link_type: Option<LinkType>,

    /// Only links at least this strong (no threshold when `None`)
    pub min_strength: Option<LinkStrength>,
}

impl LinkQuery {
    /// Query matching every link
    pub fn all() -> Self {
        Self::default()
    }

    /// Check whether a link satisfies both criteria
    pub fn matches(&self, link: &Link) -> bool {
        let type_ok = self.link_type.map_or(true, |t| link.link_type == t);
        let strength_ok = link.strength >= self.min_strength.unwrap_or(LinkStrength::MIN);
        type_ok && strength_ok
    }
}

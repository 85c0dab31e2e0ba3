//! Case module - read-only references from the case-management source

use crate::{CaseId, PersonId};

/// A case as ingested from the system of record
///
/// The core never mutates cases; it only reads them to build views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// Unique identifier
    pub id: CaseId,

    /// Human-readable case number (e.g. "CAS 123/04/2021")
    pub case_number: String,

    /// Case type (e.g. "Murder", "Robbery")
    pub case_type: String,

    /// Province the case is registered in
    pub province: String,
}

impl Case {
    /// Create a new case reference
    pub fn new(
        id: CaseId,
        case_number: impl Into<String>,
        case_type: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        Self {
            id,
            case_number: case_number.into(),
            case_type: case_type.into(),
            province: province.into(),
        }
    }
}

/// A person referenced by a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Involvement {
    /// The referencing case
    pub case_id: CaseId,

    /// The referenced person
    pub person_id: PersonId,
}

impl Involvement {
    /// Create a new involvement record
    pub fn new(case_id: CaseId, person_id: PersonId) -> Self {
        Self { case_id, person_id }
    }
}

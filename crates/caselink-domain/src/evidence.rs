//! Evidence module - artifacts held against a case

use crate::{CaseId, EvidenceId};
use std::fmt;

/// Kind of evidentiary artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvidenceKind {
    /// Unprocessed forensic sample
    Sample,
    /// DNA profile
    Dna,
    /// Fingerprint lift
    Fingerprint,
    /// Seized drugs
    Drug,
    /// Firearm or other weapon
    Weapon,
    /// Scene or address
    Location,
    /// Vehicle
    Vehicle,
    /// Phone or SIM
    Phone,
    /// Cash or account
    Money,
    /// Gang, syndicate or company
    Organization,
}

impl EvidenceKind {
    /// Every artifact kind
    pub const ALL: [EvidenceKind; 10] = [
        EvidenceKind::Sample,
        EvidenceKind::Dna,
        EvidenceKind::Fingerprint,
        EvidenceKind::Drug,
        EvidenceKind::Weapon,
        EvidenceKind::Location,
        EvidenceKind::Vehicle,
        EvidenceKind::Phone,
        EvidenceKind::Money,
        EvidenceKind::Organization,
    ];

    /// Get the kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Sample => "sample",
            EvidenceKind::Dna => "dna",
            EvidenceKind::Fingerprint => "fingerprint",
            EvidenceKind::Drug => "drug",
            EvidenceKind::Weapon => "weapon",
            EvidenceKind::Location => "location",
            EvidenceKind::Vehicle => "vehicle",
            EvidenceKind::Phone => "phone",
            EvidenceKind::Money => "money",
            EvidenceKind::Organization => "organization",
        }
    }

    /// Parse a kind name, ignoring ASCII case
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        EvidenceKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An artifact associated with one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    /// Unique identifier
    pub id: EvidenceId,

    /// Owning case
    pub case_id: CaseId,

    /// Kind of artifact
    pub kind: EvidenceKind,

    /// Display label (lab number, registration, description)
    pub label: String,

    /// Display color requested by the source, if any
    pub color: Option<String>,
}

impl Evidence {
    /// Create a new artifact
    pub fn new(id: EvidenceId, case_id: CaseId, kind: EvidenceKind, label: impl Into<String>) -> Self {
        Self {
            id,
            case_id,
            kind,
            label: label.into(),
            color: None,
        }
    }

    /// Set a display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

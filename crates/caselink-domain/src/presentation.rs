//! Type resolver: node kind and role to icon and color
//!
//! This sits at the rendering boundary and is deliberately total. A record
//! with an unknown kind or role still renders (as a case, or as a neutral
//! person) instead of failing the whole view. Contrast with the query
//! engine, which rejects malformed input outright.

use crate::{EvidenceKind, GraphNode, NodeKind, PersonRole};
use std::fmt;

/// Icon identifiers understood by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Folder icon for cases
    Case,
    /// Chained folder for linked cases
    LinkedCase,
    /// Plain silhouette
    Person,
    /// Silhouette with alert badge
    PersonSuspect,
    /// Silhouette with handcuffs
    PersonArrested,
    /// Test tube
    Sample,
    /// Double helix
    Dna,
    /// Fingerprint
    Fingerprint,
    /// Pill
    Drug,
    /// Pistol
    Weapon,
    /// Map pin
    Location,
    /// Car
    Vehicle,
    /// Handset
    Phone,
    /// Banknote
    Money,
    /// Building
    Organization,
    /// Stacked circles
    Cluster,
}

impl Icon {
    /// Get the icon identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Case => "case",
            Icon::LinkedCase => "linked-case",
            Icon::Person => "person",
            Icon::PersonSuspect => "person-suspect",
            Icon::PersonArrested => "person-arrested",
            Icon::Sample => "sample",
            Icon::Dna => "dna",
            Icon::Fingerprint => "fingerprint",
            Icon::Drug => "drug",
            Icon::Weapon => "weapon",
            Icon::Location => "location",
            Icon::Vehicle => "vehicle",
            Icon::Phone => "phone",
            Icon::Money => "money",
            Icon::Organization => "organization",
            Icon::Cluster => "cluster",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default color for cases
pub const CASE_COLOR: &str = "#2563eb";
/// Default color for linked cases
pub const LINKED_CASE_COLOR: &str = "#7c3aed";
/// Color for persons without a decisive role
pub const NEUTRAL_COLOR: &str = "#6b7280";
/// Color for suspects
pub const ALERT_COLOR: &str = "#dc2626";
/// Color for arrested persons
pub const CUSTODY_COLOR: &str = "#ea580c";
/// Default color for clusters
pub const CLUSTER_COLOR: &str = "#94a3b8";

/// Presentation token for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Icon identifier
    pub icon: Icon,
    /// CSS color
    pub color: String,
}

/// Resolve raw kind and role strings, as found on an untrusted record
///
/// Unknown kinds resolve like `case`; unknown or missing roles resolve
/// like an unset role. A blank override is ignored.
pub fn resolve(kind: &str, role: Option<&str>, color_override: Option<&str>) -> Presentation {
    let kind = NodeKind::parse(kind).unwrap_or(NodeKind::Case);
    let role = role.and_then(PersonRole::parse);
    resolve_kind(kind, role, color_override)
}

/// Resolve a typed kind and role
pub fn resolve_kind(
    kind: NodeKind,
    role: Option<PersonRole>,
    color_override: Option<&str>,
) -> Presentation {
    let (icon, default_color) = default_token(kind, role);
    let color = color_override
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(default_color);

    Presentation {
        icon,
        color: color.to_string(),
    }
}

fn default_token(kind: NodeKind, role: Option<PersonRole>) -> (Icon, &'static str) {
    match kind {
        NodeKind::Case => (Icon::Case, CASE_COLOR),
        NodeKind::LinkedCase => (Icon::LinkedCase, LINKED_CASE_COLOR),
        NodeKind::Person => match role {
            Some(PersonRole::Suspect) => (Icon::PersonSuspect, ALERT_COLOR),
            Some(PersonRole::Arrested) => (Icon::PersonArrested, CUSTODY_COLOR),
            Some(PersonRole::Reference) | None => (Icon::Person, NEUTRAL_COLOR),
        },
        NodeKind::Artifact(evidence) => artifact_token(evidence),
        NodeKind::Cluster => (Icon::Cluster, CLUSTER_COLOR),
    }
}

fn artifact_token(kind: EvidenceKind) -> (Icon, &'static str) {
    match kind {
        EvidenceKind::Sample => (Icon::Sample, "#0d9488"),
        EvidenceKind::Dna => (Icon::Dna, "#9333ea"),
        EvidenceKind::Fingerprint => (Icon::Fingerprint, "#0284c7"),
        EvidenceKind::Drug => (Icon::Drug, "#16a34a"),
        EvidenceKind::Weapon => (Icon::Weapon, "#991b1b"),
        EvidenceKind::Location => (Icon::Location, "#d97706"),
        EvidenceKind::Vehicle => (Icon::Vehicle, "#475569"),
        EvidenceKind::Phone => (Icon::Phone, "#0891b2"),
        EvidenceKind::Money => (Icon::Money, "#ca8a04"),
        EvidenceKind::Organization => (Icon::Organization, "#be185d"),
    }
}

impl GraphNode {
    /// Presentation token for this node, honoring its color override
    pub fn presentation(&self) -> Presentation {
        resolve_kind(self.kind(), self.role(), self.color.as_deref())
    }
}

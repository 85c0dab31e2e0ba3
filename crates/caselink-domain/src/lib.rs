//! Caselink Domain Layer
//!
//! This crate contains the data model of the forensic case-link graph. It has
//! ZERO external dependencies and defines the records, value objects and
//! trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Case / Person / Evidence**: read-only records owned by the
//!   case-management source
//! - **Link**: a scored relationship between two distinct cases, typed as
//!   `DNA_MATCH`, `ID_NUMBER` or `EVIDENCE`
//! - **Link strength**: normalized confidence in [0, 1]
//! - **Tier**: presentation bucket (severe / medium / normal) derived from
//!   strength thresholds
//! - **Graph node / edge**: ephemeral view artifacts built per request
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and validation only
//! - Storage, transport and query evaluation live in other crates
//! - Trait definitions for all record access

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod evidence;
pub mod ids;
pub mod link;
pub mod node;
pub mod person;
pub mod presentation;
pub mod records;
pub mod strength;
pub mod summary;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use case::{Case, Involvement};
pub use evidence::{Evidence, EvidenceKind};
pub use ids::{CaseId, EvidenceId, LinkId, PersonId};
pub use link::{CasePair, Link, LinkKey, LinkType};
pub use node::{EdgeKind, GraphEdge, GraphNode, NodeData, NodeId, NodeKind};
pub use person::{Person, PersonRole};
pub use presentation::{resolve, resolve_kind, Icon, Presentation};
pub use records::RecordSet;
pub use strength::LinkStrength;
pub use summary::LinkTypeSummary;
pub use tier::{StrengthTier, TierCounts};

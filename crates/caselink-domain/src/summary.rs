//! Per-type link aggregates

use crate::{LinkType, TierCounts};

/// Aggregate of all links of one type
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTypeSummary {
    /// Link type being summarized
    pub link_type: LinkType,

    /// Number of links of this type
    pub count: usize,

    /// Arithmetic mean of their strengths, unrounded
    pub avg_strength: f64,

    /// Links per strength tier
    pub tiers: TierCounts,
}

//! Tier module - presentation buckets for link strength

use crate::LinkStrength;

/// Lower bound (inclusive) of the severe tier
pub const SEVERE_THRESHOLD: f64 = 0.9;

/// Lower bound (inclusive) of the medium tier
pub const MEDIUM_THRESHOLD: f64 = 0.7;

/// Strength tier of a link
///
/// The thresholds live here and only here, so aggregate counts and every
/// rendering of a link agree on where a bucket starts:
/// - Severe: strength >= 0.9
/// - Medium: 0.7 <= strength < 0.9
/// - Normal: everything below 0.7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthTier {
    /// Weak or circumstantial link
    Normal,

    /// Probable link worth review
    Medium,

    /// Near-certain link
    Severe,
}

impl StrengthTier {
    /// Classify a strength into its tier
    pub fn classify(strength: LinkStrength) -> Self {
        let value = strength.value();
        if value >= SEVERE_THRESHOLD {
            StrengthTier::Severe
        } else if value >= MEDIUM_THRESHOLD {
            StrengthTier::Medium
        } else {
            StrengthTier::Normal
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthTier::Normal => "normal",
            StrengthTier::Medium => "medium",
            StrengthTier::Severe => "severe",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(StrengthTier::Normal),
            "medium" => Some(StrengthTier::Medium),
            "severe" | "high" => Some(StrengthTier::Severe),
            _ => None,
        }
    }
}

impl std::str::FromStr for StrengthTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid strength tier: {}", s))
    }
}

/// Number of links per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    /// Links below the medium threshold
    pub normal: usize,
    /// Links in the medium band
    pub medium: usize,
    /// Links at or above the severe threshold
    pub severe: usize,
}

impl TierCounts {
    /// Count one more link of the given strength
    pub fn record(&mut self, strength: LinkStrength) {
        match StrengthTier::classify(strength) {
            StrengthTier::Normal => self.normal += 1,
            StrengthTier::Medium => self.medium += 1,
            StrengthTier::Severe => self.severe += 1,
        }
    }

    /// Total number of links counted
    pub fn total(&self) -> usize {
        self.normal + self.medium + self.severe
    }
}

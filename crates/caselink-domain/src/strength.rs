//! Link strength module

use std::cmp::Ordering;
use std::fmt;

/// Normalized confidence score of a link, always within [0.0, 1.0]
///
/// Construction never clamps: a value outside the domain (or NaN) is an
/// error, so a malformed score from the matching process cannot silently
/// turn into a plausible one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStrength(f64);

impl LinkStrength {
    /// Weakest possible link
    pub const MIN: LinkStrength = LinkStrength(0.0);

    /// Strongest possible link
    pub const MAX: LinkStrength = LinkStrength(1.0);

    /// Create a new strength
    ///
    /// # Errors
    /// Returns error if the value is NaN or outside [0, 1]
    pub fn new(value: f64) -> Result<Self, String> {
        if value.is_nan() {
            return Err("Link strength must be a number".to_string());
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("Link strength {} is outside [0, 1]", value));
        }
        Ok(Self(value))
    }

    /// Get the raw score
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The stronger of two scores
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl Eq for LinkStrength {}

impl PartialOrd for LinkStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LinkStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for LinkStrength {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Two decimals, truncated, so a printed value never reads above its tier
impl fmt::Display for LinkStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hundredths = (self.0 * 100.0).round();
        if hundredths / 100.0 > self.0 {
            hundredths -= 1.0;
        }
        write!(f, "{:.2}", hundredths / 100.0)
    }
}

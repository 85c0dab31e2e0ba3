//! Link module - scored relationships between two cases

use crate::{CaseId, LinkId, LinkStrength, StrengthTier};
use std::fmt;

/// Kind of evidence that links two cases
///
/// Declaration order is the presentation order used by summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkType {
    /// Both cases share a DNA profile match
    DnaMatch,

    /// Both cases reference the same identity number
    IdNumber,

    /// Both cases share a physical or digital exhibit
    Evidence,
}

impl LinkType {
    /// Every link type, in declaration order
    pub const ALL: [LinkType; 3] = [LinkType::DnaMatch, LinkType::IdNumber, LinkType::Evidence];

    /// Get the wire name (`DNA_MATCH`, `ID_NUMBER`, `EVIDENCE`)
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::DnaMatch => "DNA_MATCH",
            LinkType::IdNumber => "ID_NUMBER",
            LinkType::Evidence => "EVIDENCE",
        }
    }

    /// Parse a wire name, ignoring ASCII case
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        LinkType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::str::FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid link type: {}", s))
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unordered pair of distinct cases, stored smallest id first
///
/// Two links describe the same relationship iff their pairs and link
/// types are equal, whichever order the matching process reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CasePair {
    low: CaseId,
    high: CaseId,
}

impl CasePair {
    /// Create a canonical pair
    ///
    /// # Errors
    /// Returns error if both sides are the same case
    pub fn new(a: CaseId, b: CaseId) -> Result<Self, String> {
        if a == b {
            return Err(format!("Case {} cannot be linked to itself", a));
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { low, high })
    }

    /// Case with the smaller identifier
    pub fn first(&self) -> CaseId {
        self.low
    }

    /// Case with the larger identifier
    pub fn second(&self) -> CaseId {
        self.high
    }

    /// Check whether the pair touches a case
    pub fn contains(&self, case: CaseId) -> bool {
        self.low == case || self.high == case
    }

    /// The case on the other side of `case`, if the pair touches it
    pub fn other(&self, case: CaseId) -> Option<CaseId> {
        if case == self.low {
            Some(self.high)
        } else if case == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

/// Key under which at most one link may exist
pub type LinkKey = (CasePair, LinkType);

/// A scored link between two cases
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Identifier assigned by the matching process
    pub id: LinkId,

    /// The two linked cases
    pub pair: CasePair,

    /// Kind of shared evidence
    pub link_type: LinkType,

    /// Confidence of the match
    pub strength: LinkStrength,
}

impl Link {
    /// Create a new link
    ///
    /// # Errors
    /// Returns error if the cases are equal or the strength is out of range
    pub fn new(
        id: LinkId,
        case1: CaseId,
        case2: CaseId,
        link_type: LinkType,
        strength: f64,
    ) -> Result<Self, String> {
        Ok(Self {
            id,
            pair: CasePair::new(case1, case2)?,
            link_type,
            strength: LinkStrength::new(strength)?,
        })
    }

    /// Uniqueness key of this link
    pub fn key(&self) -> LinkKey {
        (self.pair, self.link_type)
    }

    /// Presentation tier of this link
    pub fn tier(&self) -> StrengthTier {
        StrengthTier::classify(self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_parse() {
        assert_eq!(LinkType::parse("DNA_MATCH"), Some(LinkType::DnaMatch));
        assert_eq!(LinkType::parse("id_number"), Some(LinkType::IdNumber));
        assert_eq!(LinkType::parse(" Evidence "), Some(LinkType::Evidence));
        assert_eq!(LinkType::parse("DNA"), None);
        assert_eq!(LinkType::parse(""), None);
    }

    #[test]
    fn test_link_type_declaration_order() {
        assert!(LinkType::DnaMatch < LinkType::IdNumber);
        assert!(LinkType::IdNumber < LinkType::Evidence);
    }

    #[test]
    fn test_case_pair_is_canonical() {
        let a = CasePair::new(CaseId::new(9), CaseId::new(3)).unwrap();
        let b = CasePair::new(CaseId::new(3), CaseId::new(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.first(), CaseId::new(3));
        assert_eq!(a.second(), CaseId::new(9));
        assert_eq!(a.other(CaseId::new(3)), Some(CaseId::new(9)));
        assert_eq!(a.other(CaseId::new(4)), None);
    }

    #[test]
    fn test_self_link_rejected() {
        assert!(CasePair::new(CaseId::new(5), CaseId::new(5)).is_err());
        assert!(Link::new(LinkId::new(1), CaseId::new(5), CaseId::new(5), LinkType::Evidence, 0.5).is_err());
    }

    #[test]
    fn test_link_key_ignores_direction() {
        let forward = Link::new(LinkId::new(1), CaseId::new(1), CaseId::new(2), LinkType::DnaMatch, 0.9).unwrap();
        let reverse = Link::new(LinkId::new(2), CaseId::new(2), CaseId::new(1), LinkType::DnaMatch, 0.4).unwrap();
        assert_eq!(forward.key(), reverse.key());
        assert_eq!(forward.tier(), StrengthTier::Severe);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: pair canonicalization ignores argument order
        #[test]
        fn test_pair_symmetry(a: u64, b: u64) {
            prop_assume!(a != b);
            let forward = CasePair::new(CaseId::new(a), CaseId::new(b)).unwrap();
            let reverse = CasePair::new(CaseId::new(b), CaseId::new(a)).unwrap();
            prop_assert_eq!(forward, reverse);
            prop_assert!(forward.first() < forward.second());
        }

        /// Property: in-range strengths construct, tier never decreases with strength
        #[test]
        fn test_tier_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low = LinkStrength::new(low).unwrap();
            let high = LinkStrength::new(high).unwrap();
            prop_assert!(StrengthTier::classify(low) <= StrengthTier::classify(high));
        }
    }
}

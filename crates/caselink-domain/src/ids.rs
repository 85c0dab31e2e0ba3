//! Record identifiers
//!
//! Every record family gets its own newtype so a person id can never be
//! passed where a case id is expected.

use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier from the system of record
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw identifier
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", stringify!($name), s, e))
            }
        }
    };
}

record_id!(
    /// Identifier of a case in the case-management source
    CaseId
);

record_id!(
    /// Identifier of a person
    PersonId
);

record_id!(
    /// Identifier of an evidentiary artifact
    EvidenceId
);

record_id!(
    /// Identifier of a link produced by the matching process
    LinkId
);

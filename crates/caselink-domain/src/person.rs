//! Person module

use crate::PersonId;
use std::fmt;

/// Role a person plays across the cases that reference them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonRole {
    /// Under suspicion, not yet in custody
    Suspect,

    /// In custody
    Arrested,

    /// Reference sample donor (victim, witness, elimination sample)
    Reference,
}

impl PersonRole {
    /// Get the role name as recorded upstream
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonRole::Suspect => "Suspect",
            PersonRole::Arrested => "Arrested",
            PersonRole::Reference => "Reference",
        }
    }

    /// Parse a role, ignoring ASCII case
    ///
    /// Returns `None` for blank or unrecognized roles, which callers treat
    /// as the neutral (unset) role.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "suspect" => Some(PersonRole::Suspect),
            "arrested" => Some(PersonRole::Arrested),
            "reference" => Some(PersonRole::Reference),
            _ => None,
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person known to the case-management source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Role, if one has been assigned
    pub role: Option<PersonRole>,
}

impl Person {
    /// Create a new person without a role
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: None,
        }
    }

    /// Assign a role
    pub fn with_role(mut self, role: PersonRole) -> Self {
        self.role = Some(role);
        self
    }
}

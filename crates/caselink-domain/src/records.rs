//! Record set - a plain bundle of source records
//!
//! Used to move a snapshot between a provider, a store and an import file
//! without committing to any one of them.

use crate::{Case, Evidence, Involvement, Link, Person};

/// Cases, persons and the records connecting them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    /// Case references
    pub cases: Vec<Case>,
    /// Person references
    pub persons: Vec<Person>,
    /// Which person appears in which case
    pub involvements: Vec<Involvement>,
    /// Artifacts held by cases
    pub evidence: Vec<Evidence>,
    /// Case-to-case links
    pub links: Vec<Link>,
}

impl RecordSet {
    /// Check whether the set holds no records at all
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
            && self.persons.is_empty()
            && self.involvements.is_empty()
            && self.evidence.is_empty()
            && self.links.is_empty()
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.cases.len()
            + self.persons.len()
            + self.involvements.len()
            + self.evidence.len()
            + self.links.len()
    }

    /// Append every record of another set
    pub fn extend(&mut self, other: RecordSet) {
        self.cases.extend(other.cases);
        self.persons.extend(other.persons);
        self.involvements.extend(other.involvements);
        self.evidence.extend(other.evidence);
        self.links.extend(other.links);
    }
}

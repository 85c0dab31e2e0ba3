//! Caselink Storage Layer
//!
//! Implements the `CaseRecords` and `LinkIngest` traits over two backends.
//!
//! # Architecture
//!
//! - `MemoryStore`: an immutable-after-load snapshot, `Sync`, used for
//!   records fetched from a remote provider and for concurrent queries
//! - `SqliteStore`: a local SQLite database for imported record sets
//!
//! Both enforce the one-link-per-pair-and-type rule at ingestion: a second
//! link with the same key never adds an edge, and the stored strength becomes
//! the larger of the two, whatever order they arrive in.
//!
//! # Examples
//!
//! ```no_run
//! use caselink_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record ingestion and queries
//! ```

#![warn(missing_docs)]

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record conflicts with one already stored
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Counts of records written by one ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Cases written
    pub cases: usize,
    /// Persons written
    pub persons: usize,
    /// Involvements written
    pub involvements: usize,
    /// Artifacts written
    pub evidence: usize,
    /// Links that created a new pair/type entry
    pub links_inserted: usize,
    /// Links that updated an existing pair/type entry
    pub links_updated: usize,
}

impl IngestReport {
    /// Format a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} case(s), {} person(s), {} involvement(s), {} artifact(s), {} link(s) inserted, {} link(s) updated",
            self.cases,
            self.persons,
            self.involvements,
            self.evidence,
            self.links_inserted,
            self.links_updated
        )
    }
}

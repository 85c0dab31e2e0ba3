//! Caselink Query
//!
//! Read-only queries over a case-link record provider.
//!
//! # Overview
//!
//! The query layer is responsible for:
//! - **Link listings**: filtered by type and minimum strength, paginated,
//!   ordered by link id
//! - **Link summaries**: count, mean strength and tier counts per link type
//! - **Neighborhoods**: bounded graphs around a focal case or person
//!
//! Everything here is synchronous and takes `&self`. Any provider that is
//! `Sync` can be queried from several threads at once.
//!
//! # Errors
//!
//! | Error | Raised for |
//! |-------|------------|
//! | `InvalidArgument` | unknown link type, threshold outside [0, 1], bad page, page size or depth |
//! | `NotFound` | focal case or person absent |
//! | `ProviderFailure` | provider error, passed through and never retried |
//!
//! # Usage
//!
//! ```no_run
//! use caselink_query::{FocalKind, GraphAssembler, LinkFilter, LinkQueryEngine};
//! use caselink_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::new("caselink.db")?;
//!
//! let engine = LinkQueryEngine::default_config();
//! for summary in engine.summarize_by_type(&store)? {
//!     println!("{}: {} links", summary.link_type, summary.count);
//! }
//!
//! let assembler = GraphAssembler::default_config();
//! let view = assembler.build_neighborhood(&store, FocalKind::Person, 7, 1)?;
//! println!("{}", view.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Limits can be configured via TOML:
//!
//! ```toml
//! [query]
//! default_page_size = 20
//! max_page_size = 500
//!
//! [graph]
//! max_depth = 3
//! cluster_threshold = 25
//! max_nodes = 500
//! ```

#![warn(missing_docs)]

mod assembler;
mod config;
mod error;
mod filter;
mod links;
mod page;

pub use assembler::{FocalKind, GraphAssembler, Neighborhood};
pub use config::{GraphConfig, QueryConfig};
pub use error::QueryError;
pub use filter::LinkFilter;
pub use links::{order_summaries, LinkQueryEngine};
pub use page::Page;

//! Caselink provider client
//!
//! Asynchronous REST/JSON client for the three provider capabilities: link
//! listing, per-type link summary and entity neighborhoods. Responses are
//! validated into domain records before they are returned.
//!
//! # Example
//!
//! ```no_run
//! use caselink_client::{CaseLinkClient, EntityKind};
//! use caselink_domain::LinkType;
//!
//! # async fn run() -> Result<(), caselink_client::ClientError> {
//! let client = CaseLinkClient::new("http://localhost:8080")?;
//!
//! let links = client.fetch_links(Some(LinkType::DnaMatch), None).await?;
//! let records = client.fetch_entity_neighborhood(EntityKind::Case, 42, 1).await?;
//! println!("{} links, {} records", links.len(), records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
pub mod dto;
mod error;

pub use client::{CaseLinkClient, EntityKind, DEFAULT_TIMEOUT_SECS};
pub use dto::RecordSetDto;
pub use error::ClientError;

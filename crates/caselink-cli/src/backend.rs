//! Record source behind the commands.
//!
//! A local profile queries its SQLite database directly. A remote profile
//! fetches from the provider first, loads the answer into a memory
//! snapshot and runs the same engine over it, so both paths share one set
//! of query semantics.

use crate::config::Profile;
use crate::error::{CliError, Result};
use caselink_client::{CaseLinkClient, ClientError, EntityKind};
use caselink_domain::{Link, LinkTypeSummary, RecordSet};
use caselink_query::{
    order_summaries, FocalKind, GraphAssembler, LinkFilter, LinkQueryEngine, Neighborhood, Page,
    QueryError,
};
use caselink_store::{IngestReport, MemoryStore, SqliteStore};
use tracing::debug;

/// Where records come from
pub enum Backend {
    /// Local SQLite database
    Local(SqliteStore),
    /// Remote provider
    Remote(CaseLinkClient),
}

impl Backend {
    /// Open the source a profile points at
    pub fn open(profile: &Profile) -> Result<Self> {
        match profile {
            Profile::Local { database } => {
                if let Some(parent) = database.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                debug!(database = %database.display(), "Opening local database");
                Ok(Backend::Local(SqliteStore::new(database)?))
            }
            Profile::Remote { url } => Ok(Backend::Remote(CaseLinkClient::new(url.clone())?)),
        }
    }

    /// List one page of links
    pub async fn list_links(
        &self,
        engine: &LinkQueryEngine,
        filter: &LinkFilter,
        page: usize,
        page_size: usize,
    ) -> Result<Page<Link>> {
        match self {
            Backend::Local(store) => Ok(engine.list_links(store, filter, page, page_size)?),
            Backend::Remote(client) => {
                let query = filter.validate()?;
                let links = client.fetch_links(query.link_type, query.min_strength).await?;
                let snapshot = MemoryStore::from_records(RecordSet {
                    links,
                    ..Default::default()
                })?;
                Ok(engine.list_links(&snapshot, filter, page, page_size)?)
            }
        }
    }

    /// Per-type link summary
    pub async fn summarize(&self, engine: &LinkQueryEngine) -> Result<Vec<LinkTypeSummary>> {
        match self {
            Backend::Local(store) => Ok(engine.summarize_by_type(store)?),
            Backend::Remote(client) => {
                let remote = client.fetch_link_type_summary().await?;
                Ok(order_summaries(remote)?)
            }
        }
    }

    /// Neighborhood of a case or person
    pub async fn neighborhood(
        &self,
        assembler: &GraphAssembler,
        kind: FocalKind,
        id: u64,
        depth: usize,
    ) -> Result<Neighborhood> {
        match self {
            Backend::Local(store) => Ok(assembler.build_neighborhood(store, kind, id, depth)?),
            Backend::Remote(client) => {
                if depth == 0 || depth > assembler.config().max_depth {
                    return Err(QueryError::InvalidArgument(format!(
                        "depth must be between 1 and {} (got {})",
                        assembler.config().max_depth,
                        depth
                    ))
                    .into());
                }
                let entity = match kind {
                    FocalKind::Case => EntityKind::Case,
                    FocalKind::Person => EntityKind::Person,
                };
                let records = client
                    .fetch_entity_neighborhood(entity, id, depth)
                    .await
                    .map_err(|e| match e {
                        ClientError::NotFound(what) => {
                            CliError::Query(QueryError::NotFound(format!("{} not found", what)))
                        }
                        other => other.into(),
                    })?;
                let snapshot = MemoryStore::from_records(records)?;
                Ok(assembler.build_neighborhood(&snapshot, kind, id, depth)?)
            }
        }
    }

    /// Write a record set into the local database
    pub fn import(&mut self, records: RecordSet) -> Result<IngestReport> {
        match self {
            Backend::Local(store) => Ok(store.ingest(records)?),
            Backend::Remote(client) => Err(CliError::NotPermitted(format!(
                "Cannot import into remote provider {}",
                client.base_url()
            ))),
        }
    }
}

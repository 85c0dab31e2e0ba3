//! Link query engine: filtered listings and per-type aggregates

use crate::{LinkFilter, Page, QueryConfig, QueryError};
use caselink_domain::traits::{CaseRecords, LinkQuery};
use caselink_domain::{Link, LinkType, LinkTypeSummary, TierCounts};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use tracing::debug;

/// Paginated, filtered queries over the links of a provider
///
/// The engine holds only its configuration. Every call reads the provider
/// afresh, so one engine can serve concurrent callers.
///
/// # Examples
///
/// ```no_run
/// use caselink_query::{LinkFilter, LinkQueryEngine};
/// use caselink_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SqliteStore::new("caselink.db")?;
/// let engine = LinkQueryEngine::default_config();
///
/// let filter = LinkFilter::new().with_type("DNA_MATCH").with_min_strength(0.7);
/// let page = engine.list_links(&store, &filter, 1, 20)?;
/// println!("{} of {} links", page.items.len(), page.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkQueryEngine {
    config: QueryConfig,
}

impl LinkQueryEngine {
    /// Create an engine with the given limits
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default limits
    pub fn default_config() -> Self {
        Self::new(QueryConfig::default())
    }

    /// Get the configured limits
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// List one page of the links matching a filter
    ///
    /// Results are ordered by link id. A page past the last one is empty
    /// and still reports the totals.
    ///
    /// # Errors
    /// - `InvalidArgument` for a malformed filter, `page < 1`,
    ///   `page_size == 0` or `page_size` above the configured maximum
    /// - `ProviderFailure` if the provider fails
    pub fn list_links<S: CaseRecords>(
        &self,
        store: &S,
        filter: &LinkFilter,
        page: usize,
        page_size: usize,
    ) -> Result<Page<Link>, QueryError>
    where
        S::Error: Display,
    {
        if page < 1 {
            return Err(QueryError::InvalidArgument(format!(
                "page must be at least 1 (got {})",
                page
            )));
        }
        if page_size == 0 || page_size > self.config.max_page_size {
            return Err(QueryError::InvalidArgument(format!(
                "page_size must be between 1 and {} (got {})",
                self.config.max_page_size, page_size
            )));
        }

        let query = filter.validate()?;
        let links = fetch_links(store, &query)?;
        let page = Page::slice(links, page, page_size);

        debug!(
            total = page.total_count,
            page = page.page,
            returned = page.items.len(),
            "Listed links"
        );
        Ok(page)
    }

    /// Count and average strength of the links of each type
    ///
    /// Types without links are omitted. Entries follow the declaration
    /// order of [`LinkType`].
    ///
    /// # Errors
    /// Returns `ProviderFailure` if the provider fails
    pub fn summarize_by_type<S: CaseRecords>(
        &self,
        store: &S,
    ) -> Result<Vec<LinkTypeSummary>, QueryError>
    where
        S::Error: Display,
    {
        let links = fetch_links(store, &LinkQuery::all())?;

        let mut groups: BTreeMap<LinkType, (usize, f64, TierCounts)> = BTreeMap::new();
        for link in &links {
            let (count, sum, tiers) = groups.entry(link.link_type).or_default();
            *count += 1;
            *sum += link.strength.value();
            tiers.record(link.strength);
        }

        let summaries: Vec<LinkTypeSummary> = groups
            .into_iter()
            .map(|(link_type, (count, sum, tiers))| LinkTypeSummary {
                link_type,
                count,
                avg_strength: sum / count as f64,
                tiers,
            })
            .collect();

        debug!(links = links.len(), types = summaries.len(), "Summarized links");
        Ok(summaries)
    }
}

/// Validate and order a summary computed by a remote provider
///
/// Remote summaries carry no tier counts; whatever they hold is kept as is.
///
/// # Errors
/// Returns `ProviderFailure` if an entry has no links, an average outside
/// [0, 1], or repeats a type
pub fn order_summaries(
    mut summaries: Vec<LinkTypeSummary>,
) -> Result<Vec<LinkTypeSummary>, QueryError> {
    let mut seen = BTreeSet::new();
    for summary in &summaries {
        if summary.count == 0 {
            return Err(QueryError::ProviderFailure(format!(
                "Summary for {} reports no links",
                summary.link_type
            )));
        }
        if !(0.0..=1.0).contains(&summary.avg_strength) {
            return Err(QueryError::ProviderFailure(format!(
                "Summary for {} has average strength {} outside [0, 1]",
                summary.link_type, summary.avg_strength
            )));
        }
        if !seen.insert(summary.link_type) {
            return Err(QueryError::ProviderFailure(format!(
                "Summary repeats link type {}",
                summary.link_type
            )));
        }
    }

    summaries.sort_by_key(|summary| summary.link_type);
    Ok(summaries)
}

/// Fetch links and enforce the query locally
///
/// The provider's answer is treated as a superset: links failing the query
/// are dropped, the rest are ordered by id and repeated ids removed.
pub(crate) fn fetch_links<S: CaseRecords>(
    store: &S,
    query: &LinkQuery,
) -> Result<Vec<Link>, QueryError>
where
    S::Error: Display,
{
    let mut links = store.links(query).map_err(QueryError::provider)?;
    links.retain(|link| query.matches(link));
    links.sort_by_key(|link| link.id);
    links.dedup_by_key(|link| link.id);
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caselink_domain::{Case, CaseId, Evidence, LinkId, Person, PersonId};

    fn link(id: u64, a: u64, b: u64, link_type: LinkType, strength: f64) -> Link {
        Link::new(LinkId::new(id), CaseId::new(a), CaseId::new(b), link_type, strength).unwrap()
    }

    /// Provider that ignores the query hint and returns links unordered
    struct SloppyProvider {
        links: Vec<Link>,
    }

    impl CaseRecords for SloppyProvider {
        type Error = String;

        fn links(&self, _query: &LinkQuery) -> Result<Vec<Link>, String> {
            Ok(self.links.iter().rev().cloned().collect())
        }
        fn case(&self, _id: CaseId) -> Result<Option<Case>, String> {
            Ok(None)
        }
        fn person(&self, _id: PersonId) -> Result<Option<Person>, String> {
            Ok(None)
        }
        fn links_for_case(&self, _id: CaseId) -> Result<Vec<Link>, String> {
            Ok(Vec::new())
        }
        fn persons_in_case(&self, _id: CaseId) -> Result<Vec<Person>, String> {
            Ok(Vec::new())
        }
        fn evidence_for_case(&self, _id: CaseId) -> Result<Vec<Evidence>, String> {
            Ok(Vec::new())
        }
        fn cases_for_person(&self, _id: PersonId) -> Result<Vec<Case>, String> {
            Ok(Vec::new())
        }
    }

    /// Provider whose every call fails
    struct FailingProvider;

    impl CaseRecords for FailingProvider {
        type Error = String;

        fn links(&self, _query: &LinkQuery) -> Result<Vec<Link>, String> {
            Err("connection refused".to_string())
        }
        fn case(&self, _id: CaseId) -> Result<Option<Case>, String> {
            Err("connection refused".to_string())
        }
        fn person(&self, _id: PersonId) -> Result<Option<Person>, String> {
            Err("connection refused".to_string())
        }
        fn links_for_case(&self, _id: CaseId) -> Result<Vec<Link>, String> {
            Err("connection refused".to_string())
        }
        fn persons_in_case(&self, _id: CaseId) -> Result<Vec<Person>, String> {
            Err("connection refused".to_string())
        }
        fn evidence_for_case(&self, _id: CaseId) -> Result<Vec<Evidence>, String> {
            Err("connection refused".to_string())
        }
        fn cases_for_person(&self, _id: PersonId) -> Result<Vec<Case>, String> {
            Err("connection refused".to_string())
        }
    }

    fn sloppy() -> SloppyProvider {
        SloppyProvider {
            links: vec![
                link(1, 1, 2, LinkType::DnaMatch, 0.95),
                link(2, 3, 4, LinkType::DnaMatch, 0.5),
                link(3, 1, 3, LinkType::IdNumber, 0.8),
                link(4, 2, 4, LinkType::Evidence, 0.3),
            ],
        }
    }

    #[test]
    fn test_filter_reapplied_to_provider_output() {
        let engine = LinkQueryEngine::default_config();
        let filter = LinkFilter::new().with_type("DNA_MATCH").with_min_strength(0.7);

        let page = engine.list_links(&sloppy(), &filter, 1, 20).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].id, LinkId::new(1));
    }

    #[test]
    fn test_results_ordered_by_id() {
        let engine = LinkQueryEngine::default_config();
        let page = engine.list_links(&sloppy(), &LinkFilter::new(), 1, 20).unwrap();
        let ids: Vec<u64> = page.items.iter().map(|l| l.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_pagination_arguments_validated() {
        let engine = LinkQueryEngine::default_config();
        let store = sloppy();
        let filter = LinkFilter::new();

        for (page, size) in [(0, 20), (1, 0), (1, 501)] {
            assert!(matches!(
                engine.list_links(&store, &filter, page, size),
                Err(QueryError::InvalidArgument(_))
            ));
        }
        assert!(engine.list_links(&store, &filter, 1, 500).is_ok());
    }

    #[test]
    fn test_provider_failure_propagated() {
        let engine = LinkQueryEngine::default_config();
        let result = engine.list_links(&FailingProvider, &LinkFilter::new(), 1, 20);
        assert_eq!(
            result,
            Err(QueryError::ProviderFailure("connection refused".to_string()))
        );
        assert!(matches!(
            engine.summarize_by_type(&FailingProvider),
            Err(QueryError::ProviderFailure(_))
        ));
    }

    #[test]
    fn test_summary_in_declaration_order() {
        let engine = LinkQueryEngine::default_config();
        let summaries = engine.summarize_by_type(&sloppy()).unwrap();

        let types: Vec<LinkType> = summaries.iter().map(|s| s.link_type).collect();
        assert_eq!(types, LinkType::ALL.to_vec());

        let dna = &summaries[0];
        assert_eq!(dna.count, 2);
        assert!((dna.avg_strength - 0.725).abs() < 1e-12);
        assert_eq!(dna.tiers.severe, 1);
        assert_eq!(dna.tiers.normal, 1);
    }

    #[test]
    fn test_order_summaries() {
        let remote = vec![
            LinkTypeSummary {
                link_type: LinkType::Evidence,
                count: 3,
                avg_strength: 0.4,
                tiers: TierCounts::default(),
            },
            LinkTypeSummary {
                link_type: LinkType::DnaMatch,
                count: 1,
                avg_strength: 0.9,
                tiers: TierCounts::default(),
            },
        ];
        let ordered = order_summaries(remote.clone()).unwrap();
        assert_eq!(ordered[0].link_type, LinkType::DnaMatch);
        assert_eq!(ordered[1].link_type, LinkType::Evidence);

        let mut duplicated = remote.clone();
        duplicated.push(remote[0].clone());
        assert!(order_summaries(duplicated).is_err());

        let mut out_of_range = remote.clone();
        out_of_range[0].avg_strength = 1.5;
        assert!(order_summaries(out_of_range).is_err());

        let mut empty = remote;
        empty[1].count = 0;
        assert!(order_summaries(empty).is_err());
    }
}

//! In-memory record snapshot

use crate::{IngestReport, StoreError};
use caselink_domain::traits::{CaseRecords, LinkIngest, LinkQuery, UpsertOutcome};
use caselink_domain::{
    Case, CaseId, Evidence, EvidenceId, Involvement, Link, LinkId, LinkKey, Person, PersonId,
    RecordSet,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Record snapshot held in memory
///
/// Holds no interior mutability, so a loaded store can be shared across
/// threads and queried concurrently.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cases: BTreeMap<CaseId, Case>,
    persons: BTreeMap<PersonId, Person>,
    involvements: BTreeSet<Involvement>,
    evidence: BTreeMap<EvidenceId, Evidence>,
    links: BTreeMap<LinkId, Link>,
    link_keys: HashMap<LinkKey, LinkId>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a record set
    pub fn from_records(records: RecordSet) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.ingest(records)?;
        Ok(store)
    }

    /// Add every record of a set
    ///
    /// Cases, persons and artifacts replace earlier records with the same
    /// id. Links go through [`LinkIngest::upsert_link`].
    pub fn ingest(&mut self, records: RecordSet) -> Result<IngestReport, StoreError> {
        let mut report = IngestReport::default();

        for case in records.cases {
            self.cases.insert(case.id, case);
            report.cases += 1;
        }
        for person in records.persons {
            self.persons.insert(person.id, person);
            report.persons += 1;
        }
        for involvement in records.involvements {
            if self.involvements.insert(involvement) {
                report.involvements += 1;
            }
        }
        for evidence in records.evidence {
            self.evidence.insert(evidence.id, evidence);
            report.evidence += 1;
        }
        for link in records.links {
            match self.upsert_link(link)? {
                UpsertOutcome::Inserted(_) => report.links_inserted += 1,
                UpsertOutcome::Updated(_) => report.links_updated += 1,
            }
        }

        debug!("Memory store ingest: {}", report.summary());
        Ok(report)
    }

    /// Number of stored links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl LinkIngest for MemoryStore {
    type Error = StoreError;

    fn upsert_link(&mut self, link: Link) -> Result<UpsertOutcome, Self::Error> {
        let key = link.key();

        if let Some(&existing_id) = self.link_keys.get(&key) {
            if let Some(existing) = self.links.get_mut(&existing_id) {
                existing.strength = existing.strength.max(link.strength);
            }
            debug!(link_id = %existing_id, "Merged duplicate link, keeping the stronger strength");
            return Ok(UpsertOutcome::Updated(existing_id));
        }

        if self.links.contains_key(&link.id) {
            return Err(StoreError::Conflict(format!(
                "Link id {} is already used by another case pair or type",
                link.id
            )));
        }

        let id = link.id;
        self.link_keys.insert(key, id);
        self.links.insert(id, link);
        Ok(UpsertOutcome::Inserted(id))
    }
}

impl CaseRecords for MemoryStore {
    type Error = StoreError;

    fn links(&self, query: &LinkQuery) -> Result<Vec<Link>, Self::Error> {
        Ok(self
            .links
            .values()
            .filter(|link| query.matches(link))
            .cloned()
            .collect())
    }

    fn case(&self, id: CaseId) -> Result<Option<Case>, Self::Error> {
        Ok(self.cases.get(&id).cloned())
    }

    fn person(&self, id: PersonId) -> Result<Option<Person>, Self::Error> {
        Ok(self.persons.get(&id).cloned())
    }

    fn links_for_case(&self, id: CaseId) -> Result<Vec<Link>, Self::Error> {
        Ok(self
            .links
            .values()
            .filter(|link| link.pair.contains(id))
            .cloned()
            .collect())
    }

    fn persons_in_case(&self, id: CaseId) -> Result<Vec<Person>, Self::Error> {
        Ok(self
            .involvements
            .iter()
            .filter(|inv| inv.case_id == id)
            .filter_map(|inv| self.persons.get(&inv.person_id).cloned())
            .collect())
    }

    fn evidence_for_case(&self, id: CaseId) -> Result<Vec<Evidence>, Self::Error> {
        Ok(self
            .evidence
            .values()
            .filter(|e| e.case_id == id)
            .cloned()
            .collect())
    }

    fn cases_for_person(&self, id: PersonId) -> Result<Vec<Case>, Self::Error> {
        Ok(self
            .involvements
            .iter()
            .filter(|inv| inv.person_id == id)
            .filter_map(|inv| self.cases.get(&inv.case_id).cloned())
            .collect())
    }
}

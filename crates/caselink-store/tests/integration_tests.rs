//! Integration tests for caselink-store
//!
//! These tests run the same record set through both backends and check that
//! they answer the provider queries identically.

use caselink_domain::traits::{CaseRecords, LinkIngest, LinkQuery, UpsertOutcome};
use caselink_domain::{
    Case, CaseId, Evidence, EvidenceId, EvidenceKind, Involvement, Link, LinkId, LinkStrength,
    LinkType, Person, PersonId, PersonRole, RecordSet,
};
use caselink_store::{MemoryStore, SqliteStore, StoreError};

fn link(id: u64, a: u64, b: u64, link_type: LinkType, strength: f64) -> Link {
    Link::new(LinkId::new(id), CaseId::new(a), CaseId::new(b), link_type, strength).unwrap()
}

fn sample_records() -> RecordSet {
    RecordSet {
        cases: vec![
            Case::new(CaseId::new(1), "CAS 101/03/2021", "Murder", "Gauteng"),
            Case::new(CaseId::new(2), "CAS 55/07/2021", "Armed robbery", "Gauteng"),
            Case::new(CaseId::new(3), "CAS 9/01/2022", "Hijacking", "KwaZulu-Natal"),
        ],
        persons: vec![
            Person::new(PersonId::new(10), "T. Mokoena").with_role(PersonRole::Suspect),
            Person::new(PersonId::new(11), "L. Naidoo").with_role(PersonRole::Arrested),
            Person::new(PersonId::new(12), "Unknown donor"),
        ],
        involvements: vec![
            Involvement::new(CaseId::new(1), PersonId::new(10)),
            Involvement::new(CaseId::new(2), PersonId::new(10)),
            Involvement::new(CaseId::new(2), PersonId::new(11)),
            Involvement::new(CaseId::new(3), PersonId::new(12)),
        ],
        evidence: vec![
            Evidence::new(EvidenceId::new(100), CaseId::new(1), EvidenceKind::Dna, "LAB-2021-0042"),
            Evidence::new(EvidenceId::new(101), CaseId::new(1), EvidenceKind::Weapon, "9mm pistol"),
            Evidence::new(EvidenceId::new(102), CaseId::new(2), EvidenceKind::Vehicle, "White Polo")
                .with_color("#ffffff"),
        ],
        links: vec![
            link(1, 1, 2, LinkType::DnaMatch, 0.95),
            link(2, 2, 3, LinkType::IdNumber, 0.72),
            link(3, 1, 3, LinkType::Evidence, 0.4),
            link(4, 2, 1, LinkType::DnaMatch, 0.5),
        ],
    }
}

fn check_provider<S>(store: &S)
where
    S: CaseRecords<Error = StoreError>,
{
    let all = store.links(&LinkQuery::all()).unwrap();
    assert_eq!(all.len(), 3, "duplicate DNA_MATCH 1-2 must collapse");

    let dna = all.iter().find(|l| l.link_type == LinkType::DnaMatch).unwrap();
    assert_eq!(dna.id, LinkId::new(1), "stored id is kept on update");
    assert_eq!(dna.strength.value(), 0.95, "weaker duplicate keeps the stronger strength");

    let strong = store
        .links(&LinkQuery {
            link_type: None,
            min_strength: Some(LinkStrength::new(0.7).unwrap()),
        })
        .unwrap();
    let strong_types: Vec<LinkType> = strong.iter().map(|l| l.link_type).collect();
    assert_eq!(strong_types, vec![LinkType::DnaMatch, LinkType::IdNumber]);

    let case = store.case(CaseId::new(2)).unwrap().unwrap();
    assert_eq!(case.case_number, "CAS 55/07/2021");
    assert!(store.case(CaseId::new(99)).unwrap().is_none());

    let suspect = store.person(PersonId::new(10)).unwrap().unwrap();
    assert_eq!(suspect.role, Some(PersonRole::Suspect));
    assert_eq!(store.person(PersonId::new(12)).unwrap().unwrap().role, None);

    assert_eq!(store.links_for_case(CaseId::new(1)).unwrap().len(), 2);
    assert_eq!(store.persons_in_case(CaseId::new(2)).unwrap().len(), 2);
    assert_eq!(store.cases_for_person(PersonId::new(10)).unwrap().len(), 2);

    let evidence = store.evidence_for_case(CaseId::new(2)).unwrap();
    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence[0].color.as_deref(), Some("#ffffff"));
    assert!(store.evidence_for_case(CaseId::new(3)).unwrap().is_empty());
}

#[test]
fn test_memory_store_answers_provider_queries() {
    let store = MemoryStore::from_records(sample_records()).unwrap();
    check_provider(&store);
}

#[test]
fn test_sqlite_store_answers_provider_queries() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let report = store.ingest(sample_records()).unwrap();

    assert_eq!(report.cases, 3);
    assert_eq!(report.links_inserted, 3);
    assert_eq!(report.links_updated, 1);

    check_provider(&store);
}

#[test]
fn test_sqlite_upsert_through_trait() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let first = store.upsert_link(link(7, 4, 5, LinkType::Evidence, 0.6)).unwrap();
    let second = store.upsert_link(link(8, 5, 4, LinkType::Evidence, 0.8)).unwrap();

    assert_eq!(first, UpsertOutcome::Inserted(LinkId::new(7)));
    assert_eq!(second, UpsertOutcome::Updated(LinkId::new(7)));

    let links = store.links(&LinkQuery::all()).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].strength.value(), 0.8);
}

#[test]
fn test_duplicates_keep_strongest_in_either_order() {
    for (first, second) in [(0.8, 0.6), (0.6, 0.8)] {
        let records = RecordSet {
            links: vec![
                link(1, 1, 2, LinkType::Evidence, first),
                link(2, 2, 1, LinkType::Evidence, second),
            ],
            ..Default::default()
        };

        let memory = MemoryStore::from_records(records.clone()).unwrap();
        let mut sqlite = SqliteStore::new(":memory:").unwrap();
        sqlite.ingest(records).unwrap();

        for links in [
            memory.links(&LinkQuery::all()).unwrap(),
            sqlite.links(&LinkQuery::all()).unwrap(),
        ] {
            assert_eq!(links.len(), 1);
            assert_eq!(links[0].id, LinkId::new(1));
            assert_eq!(links[0].strength.value(), 0.8, "order {} then {}", first, second);
        }
    }
}

#[test]
fn test_sqlite_reused_link_id_is_a_conflict() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.upsert_link(link(1, 1, 2, LinkType::Evidence, 0.6)).unwrap();

    let result = store.upsert_link(link(1, 3, 4, LinkType::DnaMatch, 0.9));
    assert!(matches!(result, Err(StoreError::Conflict(_))));
}

#[test]
fn test_sqlite_links_are_ordered_by_id() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.upsert_link(link(30, 1, 2, LinkType::Evidence, 0.6)).unwrap();
    store.upsert_link(link(10, 1, 3, LinkType::Evidence, 0.6)).unwrap();
    store.upsert_link(link(20, 2, 3, LinkType::Evidence, 0.6)).unwrap();

    let ids: Vec<u64> = store
        .links(&LinkQuery::all())
        .unwrap()
        .iter()
        .map(|l| l.id.value())
        .collect();
    assert_eq!(ids, vec![10, 20, 30]);
}

#[test]
fn test_sqlite_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caselink.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.ingest(sample_records()).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    check_provider(&store);
}

//! End-to-end tests of the local profile: import a record file, then query it.

use caselink_cli::commands::import::read_records;
use caselink_cli::{Backend, CliError, Config, Profile};
use caselink_domain::{CaseId, LinkType, NodeId};
use caselink_query::{FocalKind, GraphAssembler, LinkFilter, LinkQueryEngine, QueryError};
use std::fs;
use tempfile::TempDir;

const RECORDS: &str = r#"{
  "cases": [
    {"id": 1, "case_number": "2024-001", "case_type": "burglary"},
    {"id": 2, "case_number": "2024-002"},
    {"id": 3, "case_number": "2024-003"}
  ],
  "persons": [
    {"id": 10, "name": "J. Doe", "role": "Suspect"}
  ],
  "involvements": [
    {"case_id": 1, "person_id": 10}
  ],
  "evidence": [
    {"id": 100, "case_id": 1, "kind": "dna", "label": "Swab A"}
  ],
  "links": [
    {"id": 1, "case1": 1, "case2": 2, "link_type": "DNA_MATCH", "link_strength": 0.95},
    {"id": 2, "case1": 1, "case2": 3, "link_type": "EVIDENCE", "link_strength": 0.6},
    {"id": 3, "case1": 3, "case2": 1, "link_type": "EVIDENCE", "link_strength": 0.8}
  ]
}"#;

fn local_backend(dir: &TempDir) -> Backend {
    let database = dir.path().join("data").join("caselink.db");
    Backend::open(&Profile::Local { database }).unwrap()
}

fn import(dir: &TempDir, backend: &mut Backend) {
    let file = dir.path().join("records.json");
    fs::write(&file, RECORDS).unwrap();
    let report = backend.import(read_records(&file).unwrap()).unwrap();
    assert_eq!(report.links_inserted, 2);
    assert_eq!(report.links_updated, 1);
}

#[tokio::test]
async fn test_import_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = local_backend(&dir);
    import(&dir, &mut backend);

    let engine = LinkQueryEngine::default_config();
    let page = backend
        .list_links(&engine, &LinkFilter::new().with_type("EVIDENCE"), 1, 20)
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].strength.value(), 0.8);

    let summaries = backend.summarize(&engine).await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].link_type, LinkType::DnaMatch);
}

#[tokio::test]
async fn test_import_then_graph() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = local_backend(&dir);
    import(&dir, &mut backend);

    let assembler = GraphAssembler::default_config();
    let view = backend
        .neighborhood(&assembler, FocalKind::Case, 1, 1)
        .await
        .unwrap();

    assert_eq!(view.focal, NodeId::Case(CaseId::new(1)));
    assert!(view.node(&NodeId::Case(CaseId::new(2))).is_some());
    assert!(view.node(&NodeId::Case(CaseId::new(3))).is_some());
    assert!(!view.truncated);

    let missing = backend.neighborhood(&assembler, FocalKind::Person, 99, 1).await;
    assert!(matches!(missing, Err(CliError::Query(QueryError::NotFound(_)))));
}

#[tokio::test]
async fn test_reopen_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut backend = local_backend(&dir);
        import(&dir, &mut backend);
    }

    let backend = local_backend(&dir);
    let page = backend
        .list_links(&LinkQueryEngine::default_config(), &LinkFilter::new(), 1, 20)
        .await
        .unwrap();
    assert_eq!(page.total_count, 2);
}

#[tokio::test]
async fn test_remote_profile_rejects_import() {
    let mut backend = Backend::open(&Profile::Remote {
        url: "http://127.0.0.1:9".to_string(),
    })
    .unwrap();

    let result = backend.import(Default::default());
    assert!(matches!(result, Err(CliError::NotPermitted(_))));
}

#[test]
fn test_config_file_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
active_profile = "lab"

[profiles.lab]
source = "remote"
url = "http://lab.example:8080"

[graph]
max_depth = 2
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config.get_active_profile().unwrap(),
        &Profile::Remote {
            url: "http://lab.example:8080".to_string()
        }
    );
    assert_eq!(config.graph.max_depth, 2);
    assert_eq!(config.query.default_page_size, 20);
}

//! Graph assembler: bounded neighborhoods around a case or person

use crate::{GraphConfig, QueryError};
use caselink_domain::traits::CaseRecords;
use caselink_domain::{
    CaseId, EdgeKind, Evidence, EvidenceKind, GraphEdge, GraphNode, LinkStrength, NodeData,
    NodeId, PersonId,
};
use std::collections::{BTreeMap, VecDeque};
use std::fmt::{self, Display};
use tracing::{debug, warn};

/// Kind of entity a neighborhood is centered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocalKind {
    /// A case
    Case,
    /// A person
    Person,
}

impl FocalKind {
    /// Get the kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            FocalKind::Case => "case",
            FocalKind::Person => "person",
        }
    }

    /// Parse a kind name, ignoring ASCII case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "case" => Some(FocalKind::Case),
            "person" => Some(FocalKind::Person),
            _ => None,
        }
    }
}

impl std::str::FromStr for FocalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid focal kind: {} (expected case or person)", s))
    }
}

impl fmt::Display for FocalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An assembled neighborhood graph
///
/// Nodes are sorted by id and edges by (source, target, kind), so equal
/// inputs produce equal values.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    /// The entity the view is centered on
    pub focal: NodeId,

    /// Every node, each entity once
    pub nodes: Vec<GraphNode>,

    /// Every edge, parallel edges collapsed
    pub edges: Vec<GraphEdge>,

    /// Set when the node ceiling stopped the expansion early
    pub truncated: bool,
}

impl Neighborhood {
    /// Find a node by id
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes
            .binary_search_by(|node| node.id.cmp(id))
            .ok()
            .map(|idx| &self.nodes[idx])
    }

    /// Format a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} node(s), {} edge(s) around {}{}",
            self.nodes.len(),
            self.edges.len(),
            self.focal,
            if self.truncated { " (truncated)" } else { "" }
        )
    }
}

/// Builds neighborhood graphs from provider records
///
/// # Examples
///
/// ```no_run
/// use caselink_query::{FocalKind, GraphAssembler};
/// use caselink_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SqliteStore::new("caselink.db")?;
/// let assembler = GraphAssembler::default_config();
///
/// let view = assembler.build_neighborhood(&store, FocalKind::Case, 42, 2)?;
/// println!("{}", view.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphAssembler {
    config: GraphConfig,
}

impl GraphAssembler {
    /// Create an assembler with the given bounds
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Create an assembler with default bounds
    pub fn default_config() -> Self {
        Self::new(GraphConfig::default())
    }

    /// Get the configured bounds
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Expand the neighborhood of a case or person
    ///
    /// Expansion is breadth-first. A case contributes its linked cases,
    /// its persons and its artifacts; a person contributes the cases it
    /// appears in. Artifacts are leaves. Entities reached at `depth` hops
    /// are included but not expanded further.
    ///
    /// # Errors
    /// - `InvalidArgument` if `depth` is 0 or above the configured maximum
    /// - `NotFound` if the focal entity does not exist
    /// - `ProviderFailure` if the provider fails
    pub fn build_neighborhood<S: CaseRecords>(
        &self,
        store: &S,
        focal_kind: FocalKind,
        focal_id: u64,
        depth: usize,
    ) -> Result<Neighborhood, QueryError>
    where
        S::Error: Display,
    {
        if depth == 0 || depth > self.config.max_depth {
            return Err(QueryError::InvalidArgument(format!(
                "depth must be between 1 and {} (got {})",
                self.config.max_depth, depth
            )));
        }

        let focal_node = match focal_kind {
            FocalKind::Case => {
                let id = CaseId::new(focal_id);
                let case = store
                    .case(id)
                    .map_err(QueryError::provider)?
                    .ok_or_else(|| QueryError::NotFound(format!("Case {} not found", id)))?;
                GraphNode::new(NodeData::Case(case))
            }
            FocalKind::Person => {
                let id = PersonId::new(focal_id);
                let person = store
                    .person(id)
                    .map_err(QueryError::provider)?
                    .ok_or_else(|| QueryError::NotFound(format!("Person {} not found", id)))?;
                GraphNode::new(NodeData::Person(person))
            }
        };

        let mut graph = GraphBuilder::new(self.config.max_nodes);
        let focal = focal_node.id;
        graph.force_node(focal_node);

        let mut queue = VecDeque::from([(focal, 0usize)]);
        while let Some((id, level)) = queue.pop_front() {
            if level >= depth || graph.truncated {
                continue;
            }
            let discovered = match id {
                NodeId::Case(case_id) => self.expand_case(store, &mut graph, case_id)?,
                NodeId::Person(person_id) => expand_person(store, &mut graph, person_id)?,
                NodeId::Evidence(_) | NodeId::Cluster(..) => Vec::new(),
            };
            queue.extend(discovered.into_iter().map(|next| (next, level + 1)));
        }

        if graph.truncated {
            warn!(
                focal = %focal,
                max_nodes = self.config.max_nodes,
                "Neighborhood truncated at node ceiling"
            );
        }

        let view = graph.finish(focal);
        debug!("Assembled neighborhood: {}", view.summary());
        Ok(view)
    }

    /// Add everything directly attached to a case; returns newly added
    /// expandable entities
    fn expand_case<S: CaseRecords>(
        &self,
        store: &S,
        graph: &mut GraphBuilder,
        case_id: CaseId,
    ) -> Result<Vec<NodeId>, QueryError>
    where
        S::Error: Display,
    {
        let source = NodeId::Case(case_id);
        let mut discovered = Vec::new();

        let mut links = store.links_for_case(case_id).map_err(QueryError::provider)?;
        links.sort_by_key(|link| link.id);
        for link in links {
            let Some(other) = link.pair.other(case_id) else {
                warn!(link_id = %link.id, case_id = %case_id, "Provider returned a link not touching the case");
                continue;
            };
            let Some(case) = store.case(other).map_err(QueryError::provider)? else {
                warn!(link_id = %link.id, case_id = %other, "Skipping link to unknown case");
                continue;
            };
            let (added, present) = graph.add_node(GraphNode::new(NodeData::LinkedCase(case)));
            if present {
                graph.add_edge(
                    NodeId::Case(link.pair.first()),
                    NodeId::Case(link.pair.second()),
                    EdgeKind::Link(link.link_type),
                    Some(link.strength),
                );
            }
            if added {
                discovered.push(NodeId::Case(other));
            }
        }

        let mut persons = store.persons_in_case(case_id).map_err(QueryError::provider)?;
        persons.sort_by_key(|person| person.id);
        for person in persons {
            let person_id = person.id;
            let (added, present) = graph.add_node(GraphNode::new(NodeData::Person(person)));
            if present {
                graph.add_edge(source, NodeId::Person(person_id), EdgeKind::Membership, None);
            }
            if added {
                discovered.push(NodeId::Person(person_id));
            }
        }

        let evidence = store.evidence_for_case(case_id).map_err(QueryError::provider)?;
        let mut by_kind: BTreeMap<EvidenceKind, Vec<Evidence>> = BTreeMap::new();
        for item in evidence {
            by_kind.entry(item.kind).or_default().push(item);
        }
        for (kind, mut items) in by_kind {
            if items.len() > self.config.cluster_threshold {
                let node = GraphNode::new(NodeData::Cluster {
                    case_id,
                    kind,
                    count: items.len(),
                });
                let target = node.id;
                if graph.add_node(node).1 {
                    graph.add_edge(source, target, EdgeKind::Containment, None);
                }
                continue;
            }
            items.sort_by_key(|item| item.id);
            for item in items {
                let target = NodeId::Evidence(item.id);
                if graph.add_node(GraphNode::new(NodeData::Artifact(item))).1 {
                    graph.add_edge(source, target, EdgeKind::Containment, None);
                }
            }
        }

        Ok(discovered)
    }
}

/// Add every case a person appears in; returns newly added cases
fn expand_person<S: CaseRecords>(
    store: &S,
    graph: &mut GraphBuilder,
    person_id: PersonId,
) -> Result<Vec<NodeId>, QueryError>
where
    S::Error: Display,
{
    let mut cases = store.cases_for_person(person_id).map_err(QueryError::provider)?;
    cases.sort_by_key(|case| case.id);

    let mut discovered = Vec::new();
    for case in cases {
        let case_id = NodeId::Case(case.id);
        let (added, present) = graph.add_node(GraphNode::new(NodeData::Case(case)));
        if present {
            graph.add_edge(case_id, NodeId::Person(person_id), EdgeKind::Membership, None);
        }
        if added {
            discovered.push(case_id);
        }
    }
    Ok(discovered)
}

/// Accumulates nodes and edges, deduplicating as it goes
struct GraphBuilder {
    nodes: BTreeMap<NodeId, GraphNode>,
    edges: BTreeMap<(NodeId, NodeId, EdgeKind), Option<LinkStrength>>,
    max_nodes: usize,
    truncated: bool,
}

impl GraphBuilder {
    fn new(max_nodes: usize) -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            max_nodes,
            truncated: false,
        }
    }

    fn force_node(&mut self, node: GraphNode) {
        self.nodes.insert(node.id, node);
    }

    /// Returns (newly added, present after the call)
    ///
    /// The first kind an entity was seen with wins.
    fn add_node(&mut self, node: GraphNode) -> (bool, bool) {
        if self.nodes.contains_key(&node.id) {
            return (false, true);
        }
        if self.nodes.len() >= self.max_nodes {
            self.truncated = true;
            return (false, false);
        }
        self.nodes.insert(node.id, node);
        (true, true)
    }

    /// Collapse parallel edges, keeping the strongest
    fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
        strength: Option<LinkStrength>,
    ) {
        if source == target {
            return;
        }
        let slot = self.edges.entry((source, target, kind)).or_insert(strength);
        *slot = match (*slot, strength) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    fn finish(self, focal: NodeId) -> Neighborhood {
        Neighborhood {
            focal,
            nodes: self.nodes.into_values().collect(),
            edges: self
                .edges
                .into_iter()
                .map(|((source, target, kind), strength)| GraphEdge {
                    source,
                    target,
                    kind,
                    strength,
                })
                .collect(),
            truncated: self.truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caselink_domain::{
        Case, EvidenceId, Involvement, Link, LinkId, LinkType, NodeKind, Person, RecordSet,
    };
    use caselink_store::MemoryStore;

    fn link(id: u64, a: u64, b: u64, link_type: LinkType, strength: f64) -> Link {
        Link::new(LinkId::new(id), CaseId::new(a), CaseId::new(b), link_type, strength).unwrap()
    }

    fn case(id: u64) -> Case {
        Case::new(CaseId::new(id), format!("CAS {}/2021", id), "Robbery", "Gauteng")
    }

    fn store(records: RecordSet) -> MemoryStore {
        MemoryStore::from_records(records).unwrap()
    }

    #[test]
    fn test_depth_validated() {
        let store = store(RecordSet {
            cases: vec![case(1)],
            ..Default::default()
        });
        let assembler = GraphAssembler::default_config();

        for depth in [0, 4] {
            assert!(matches!(
                assembler.build_neighborhood(&store, FocalKind::Case, 1, depth),
                Err(QueryError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_missing_focal_is_not_found() {
        let store = store(RecordSet::default());
        let assembler = GraphAssembler::default_config();

        assert!(matches!(
            assembler.build_neighborhood(&store, FocalKind::Case, 9, 1),
            Err(QueryError::NotFound(_))
        ));
        assert!(matches!(
            assembler.build_neighborhood(&store, FocalKind::Person, 9, 1),
            Err(QueryError::NotFound(_))
        ));
    }

    #[test]
    fn test_isolated_focal_is_single_node() {
        let store = store(RecordSet {
            cases: vec![case(1)],
            ..Default::default()
        });
        let view = GraphAssembler::default_config()
            .build_neighborhood(&store, FocalKind::Case, 1, 1)
            .unwrap();
        assert_eq!(view.nodes.len(), 1);
        assert!(view.edges.is_empty());
        assert!(!view.truncated);
    }

    #[test]
    fn test_focal_case_contents() {
        let store = store(RecordSet {
            cases: vec![case(1), case(2)],
            persons: vec![Person::new(PersonId::new(10), "A. Suspect")],
            involvements: vec![Involvement::new(CaseId::new(1), PersonId::new(10))],
            evidence: vec![Evidence::new(
                EvidenceId::new(100),
                CaseId::new(1),
                EvidenceKind::Fingerprint,
                "Left thumb",
            )],
            links: vec![link(1, 2, 1, LinkType::IdNumber, 0.8)],
        });
        let view = GraphAssembler::default_config()
            .build_neighborhood(&store, FocalKind::Case, 1, 1)
            .unwrap();

        assert_eq!(view.focal, NodeId::Case(CaseId::new(1)));
        assert_eq!(view.nodes.len(), 4);
        assert_eq!(
            view.node(&NodeId::Case(CaseId::new(2))).unwrap().kind(),
            NodeKind::LinkedCase
        );
        assert_eq!(
            view.node(&NodeId::Case(CaseId::new(1))).unwrap().kind(),
            NodeKind::Case
        );

        let link_edge = view
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::Link(LinkType::IdNumber))
            .unwrap();
        assert_eq!(link_edge.source, NodeId::Case(CaseId::new(1)));
        assert_eq!(link_edge.target, NodeId::Case(CaseId::new(2)));
        assert_eq!(link_edge.strength.map(|s| s.value()), Some(0.8));

        assert!(view.edges.iter().any(|e| e.kind == EdgeKind::Membership));
        assert!(view.edges.iter().any(|e| e.kind == EdgeKind::Containment));
    }

    #[test]
    fn test_focal_person_depth_one_does_not_recurse() {
        let store = store(RecordSet {
            cases: vec![case(1), case(2), case(3)],
            persons: vec![Person::new(PersonId::new(10), "A. Suspect")],
            involvements: vec![
                Involvement::new(CaseId::new(1), PersonId::new(10)),
                Involvement::new(CaseId::new(2), PersonId::new(10)),
            ],
            links: vec![link(1, 2, 3, LinkType::Evidence, 0.5)],
            ..Default::default()
        });
        let assembler = GraphAssembler::default_config();

        let shallow = assembler
            .build_neighborhood(&store, FocalKind::Person, 10, 1)
            .unwrap();
        assert_eq!(shallow.nodes.len(), 3);
        assert_eq!(shallow.edges.len(), 2);
        assert!(shallow.edges.iter().all(|e| e.kind == EdgeKind::Membership));

        let deeper = assembler
            .build_neighborhood(&store, FocalKind::Person, 10, 2)
            .unwrap();
        assert!(deeper.node(&NodeId::Case(CaseId::new(3))).is_some());
    }

    #[test]
    fn test_shared_entity_appears_once() {
        // Person 10 is in both linked cases; the link 1-2 is reachable from both sides.
        let store = store(RecordSet {
            cases: vec![case(1), case(2)],
            persons: vec![Person::new(PersonId::new(10), "A. Suspect")],
            involvements: vec![
                Involvement::new(CaseId::new(1), PersonId::new(10)),
                Involvement::new(CaseId::new(2), PersonId::new(10)),
            ],
            links: vec![link(1, 1, 2, LinkType::DnaMatch, 0.95)],
            ..Default::default()
        });
        let view = GraphAssembler::default_config()
            .build_neighborhood(&store, FocalKind::Case, 1, 3)
            .unwrap();

        assert_eq!(view.nodes.len(), 3);
        let link_edges = view
            .edges
            .iter()
            .filter(|e| matches!(e.kind, EdgeKind::Link(_)))
            .count();
        assert_eq!(link_edges, 1);
        assert_eq!(view.edges.len(), 3);
    }

    #[test]
    fn test_artifacts_cluster_past_threshold() {
        let evidence = (0..4)
            .map(|i| {
                Evidence::new(
                    EvidenceId::new(100 + i),
                    CaseId::new(1),
                    EvidenceKind::Phone,
                    format!("Handset {}", i),
                )
            })
            .chain(std::iter::once(Evidence::new(
                EvidenceId::new(200),
                CaseId::new(1),
                EvidenceKind::Money,
                "R 12 000",
            )))
            .collect();
        let store = store(RecordSet {
            cases: vec![case(1)],
            evidence,
            ..Default::default()
        });
        let assembler = GraphAssembler::new(GraphConfig {
            cluster_threshold: 3,
            ..Default::default()
        });

        let view = assembler.build_neighborhood(&store, FocalKind::Case, 1, 1).unwrap();
        assert_eq!(view.nodes.len(), 3);

        let cluster = view
            .node(&NodeId::Cluster(CaseId::new(1), EvidenceKind::Phone))
            .unwrap();
        assert_eq!(cluster.label(), "4 x phone");
        assert!(view.node(&NodeId::Evidence(EvidenceId::new(200))).is_some());
    }

    #[test]
    fn test_node_ceiling_truncates() {
        let store = store(RecordSet {
            cases: (1..=6).map(case).collect(),
            links: (2..=6).map(|i| link(i, 1, i, LinkType::Evidence, 0.5)).collect(),
            ..Default::default()
        });
        let assembler = GraphAssembler::new(GraphConfig {
            max_nodes: 3,
            ..Default::default()
        });

        let view = assembler.build_neighborhood(&store, FocalKind::Case, 1, 1).unwrap();
        assert!(view.truncated);
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.edges.len(), 2);
    }

    #[test]
    fn test_parallel_edges_keep_max_strength() {
        let mut graph = GraphBuilder::new(10);
        let a = NodeId::Case(CaseId::new(1));
        let b = NodeId::Case(CaseId::new(2));
        let kind = EdgeKind::Link(LinkType::Evidence);

        graph.add_edge(a, b, kind, Some(LinkStrength::new(0.6).unwrap()));
        graph.add_edge(a, b, kind, Some(LinkStrength::new(0.8).unwrap()));
        graph.add_edge(a, b, kind, Some(LinkStrength::new(0.7).unwrap()));
        graph.add_edge(a, a, kind, Some(LinkStrength::new(0.9).unwrap()));

        let view = graph.finish(a);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.edges[0].strength.map(|s| s.value()), Some(0.8));
    }

    #[test]
    fn test_focal_kind_parse() {
        assert_eq!(FocalKind::parse("Case"), Some(FocalKind::Case));
        assert_eq!(" person ".parse::<FocalKind>(), Ok(FocalKind::Person));
        assert!(FocalKind::parse("evidence").is_none());
    }
}

//! Graph node and edge model
//!
//! Nodes and edges are view artifacts: they are derived from case, person,
//! evidence and link records for one assembly request and never persisted.

use crate::{
    Case, CaseId, Evidence, EvidenceId, EvidenceKind, LinkStrength, LinkType, Person, PersonId,
    PersonRole,
};
use std::fmt;

/// Closed set of node kinds a view can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// A case reached directly (focal case, or a case a person appears in)
    Case,
    /// A case reached through a link
    LinkedCase,
    /// A person
    Person,
    /// An evidentiary artifact
    Artifact(EvidenceKind),
    /// A group of same-kind artifacts collapsed into one node
    Cluster,
}

impl NodeKind {
    /// Get the kind name used at the presentation boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Case => "case",
            NodeKind::LinkedCase => "linked_case",
            NodeKind::Person => "person",
            NodeKind::Artifact(kind) => kind.as_str(),
            NodeKind::Cluster => "cluster",
        }
    }

    /// Parse a kind name, ignoring ASCII case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "case" => Some(NodeKind::Case),
            "linked_case" => Some(NodeKind::LinkedCase),
            "person" => Some(NodeKind::Person),
            "cluster" => Some(NodeKind::Cluster),
            other => EvidenceKind::parse(other).map(NodeKind::Artifact),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a node: the entity it was derived from
///
/// A case keeps the same id whether it is shown as `case` or `linked_case`,
/// which is what lets the assembler emit each entity once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    /// A case
    Case(CaseId),
    /// A person
    Person(PersonId),
    /// A single artifact
    Evidence(EvidenceId),
    /// All artifacts of one kind held by one case
    Cluster(CaseId, EvidenceKind),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Case(id) => write!(f, "case:{}", id),
            NodeId::Person(id) => write!(f, "person:{}", id),
            NodeId::Evidence(id) => write!(f, "evidence:{}", id),
            NodeId::Cluster(case, kind) => write!(f, "cluster:{}:{}", case, kind),
        }
    }
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Case shown directly
    Case(Case),
    /// Case shown as a link target
    LinkedCase(Case),
    /// Person
    Person(Person),
    /// Single artifact
    Artifact(Evidence),
    /// Collapsed artifacts
    Cluster {
        /// Case holding the artifacts
        case_id: CaseId,
        /// Kind shared by every member
        kind: EvidenceKind,
        /// Number of collapsed artifacts
        count: usize,
    },
}

/// A node of an assembled neighborhood
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Entity identity
    pub id: NodeId,

    /// Display color requested by the source record, if any
    pub color: Option<String>,

    /// Kind-specific payload
    pub data: NodeData,
}

impl GraphNode {
    /// Build a node from its payload, deriving id and color
    pub fn new(data: NodeData) -> Self {
        let (id, color) = match &data {
            NodeData::Case(case) | NodeData::LinkedCase(case) => (NodeId::Case(case.id), None),
            NodeData::Person(person) => (NodeId::Person(person.id), None),
            NodeData::Artifact(evidence) => (NodeId::Evidence(evidence.id), evidence.color.clone()),
            NodeData::Cluster { case_id, kind, .. } => (NodeId::Cluster(*case_id, *kind), None),
        };
        Self { id, color, data }
    }

    /// Kind of this node
    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Case(_) => NodeKind::Case,
            NodeData::LinkedCase(_) => NodeKind::LinkedCase,
            NodeData::Person(_) => NodeKind::Person,
            NodeData::Artifact(evidence) => NodeKind::Artifact(evidence.kind),
            NodeData::Cluster { .. } => NodeKind::Cluster,
        }
    }

    /// Role of the node; only persons have one
    pub fn role(&self) -> Option<PersonRole> {
        match &self.data {
            NodeData::Person(person) => person.role,
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> String {
        match &self.data {
            NodeData::Case(case) | NodeData::LinkedCase(case) => case.case_number.clone(),
            NodeData::Person(person) => person.name.clone(),
            NodeData::Artifact(evidence) => evidence.label.clone(),
            NodeData::Cluster { kind, count, .. } => format!("{} x {}", count, kind),
        }
    }
}

/// Relationship an edge stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    /// A scored case-to-case link
    Link(LinkType),
    /// Case references a person
    Membership,
    /// Case holds an artifact (or a cluster of artifacts)
    Containment,
}

impl EdgeKind {
    /// Get the edge label
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Link(link_type) => link_type.as_str(),
            EdgeKind::Membership => "MEMBER",
            EdgeKind::Containment => "CONTAINS",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An edge of an assembled neighborhood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Source node
    pub source: NodeId,

    /// Target node
    pub target: NodeId,

    /// Relationship kind
    pub kind: EdgeKind,

    /// Strength for link edges
    pub strength: Option<LinkStrength>,
}

//! Graph module - projection of triples onto a renderable node/edge list

use crate::{ClusterAssignment, Triple};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Cluster used for nodes that have no assignment
pub const DEFAULT_CLUSTER: u32 = 0;

/// A node of the projected graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Node identifier, equal to a subject or object value
    pub id: String,

    /// Display label (same text as the id)
    pub label: String,

    /// Cluster id used for coloring
    pub cluster: u32,
}

/// A labeled, directed edge of the projected graph
///
/// Edges have no identity of their own: duplicate triples yield
/// duplicate edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Source node id (triple subject)
    pub source: String,

    /// Target node id (triple object)
    pub target: String,

    /// Edge label (triple relation)
    pub label: String,
}

/// Lookup from node id to cluster id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterMap {
    clusters: HashMap<String, u32>,
}

impl ClusterMap {
    /// Create an empty map (every node falls back to the default cluster)
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assignment, replacing any previous one for the node
    pub fn insert(&mut self, node_id: impl Into<String>, cluster_id: u32) {
        self.clusters.insert(node_id.into(), cluster_id);
    }

    /// Cluster for a node, if assigned
    pub fn get(&self, node_id: &str) -> Option<u32> {
        self.clusters.get(node_id).copied()
    }

    /// Cluster for a node, or [`DEFAULT_CLUSTER`]
    pub fn cluster_of(&self, node_id: &str) -> u32 {
        self.get(node_id).unwrap_or(DEFAULT_CLUSTER)
    }

    /// Number of assigned nodes
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether no node is assigned
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl FromIterator<ClusterAssignment> for ClusterMap {
    /// Later assignments for the same node win.
    fn from_iter<I: IntoIterator<Item = ClusterAssignment>>(iter: I) -> Self {
        let mut map = ClusterMap::new();
        for assignment in iter {
            map.insert(assignment.node_id, assignment.cluster_id);
        }
        map
    }
}

impl<'a> FromIterator<&'a ClusterAssignment> for ClusterMap {
    fn from_iter<I: IntoIterator<Item = &'a ClusterAssignment>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}

/// Output of [`project`]: nodes in discovery order, then edges in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Distinct nodes, in the order they were first referenced
    pub nodes: Vec<GraphNode>,

    /// One edge per input triple, in input order
    pub edges: Vec<GraphEdge>,
}

impl Projection {
    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the projection has neither nodes nor edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Distinct cluster ids present, ascending
    pub fn clusters(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .map(|n| n.cluster)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Project triples onto a deduplicated node list and an edge list.
///
/// Triples are walked in input order. The subject and then the object of
/// each triple become a node the first time they are seen, colored by
/// `clusters` (default cluster 0). Every triple yields exactly one edge.
/// Inputs are not validated; empty strings are valid ids.
///
/// # Examples
///
/// ```
/// use docgraph_domain::{project, ClusterMap, Triple};
///
/// let triples = vec![Triple::new("A", "knows", "B"), Triple::new("B", "knows", "C")];
/// let mut clusters = ClusterMap::new();
/// clusters.insert("B", 1);
///
/// let graph = project(&triples, &clusters);
/// let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
/// assert_eq!(ids, ["A", "B", "C"]);
/// assert_eq!(graph.edges.len(), 2);
/// ```
pub fn project(triples: &[Triple], clusters: &ClusterMap) -> Projection {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::with_capacity(triples.len());

    for triple in triples {
        for id in [triple.subject.as_str(), triple.object.as_str()] {
            if seen.insert(id) {
                nodes.push(GraphNode {
                    id: id.to_string(),
                    label: id.to_string(),
                    cluster: clusters.cluster_of(id),
                });
            }
        }

        edges.push(GraphEdge {
            source: triple.subject.clone(),
            target: triple.object.clone(),
            label: triple.relation.clone(),
        });
    }

    Projection { nodes, edges }
}

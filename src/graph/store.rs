//! In-memory graph storage
//!
//! Backs the embedded connection used by tests, the CLI's `--embedded` mode
//! and the benchmarks. Nodes and edges live in arenas indexed by id, so
//! iteration order is always creation order.

use super::edge::Edge;
use super::node::Node;
use super::property::PropertyMap;
use super::types::{EdgeId, EdgeType, Label, NodeId};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (arena)
/// - edges: EdgeId -> Edge (arena)
/// - outgoing: NodeId -> Vec<EdgeId> (adjacency list, creation order)
/// - label_index: Label -> Vec<NodeId> (creation order)
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
    label_index: FxHashMap<Label, Vec<NodeId>>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new node with a single label
    pub fn create_node(&mut self, label: impl Into<Label>) -> NodeId {
        self.create_node_with_labels(vec![label.into()])
    }

    /// Create a new node carrying every label in `labels`
    pub fn create_node_with_labels(&mut self, labels: Vec<Label>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        let node = Node::new_with_labels(id, labels);
        for label in &node.labels {
            self.label_index.entry(label.clone()).or_default().push(id);
        }
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        id
    }

    /// Create a node with a label and an initial property map
    pub fn create_node_with_properties(&mut self, label: impl Into<Label>, properties: PropertyMap) -> NodeId {
        let id = self.create_node(label);
        self.nodes[id.as_u64() as usize].properties = properties;
        id
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_u64() as usize)
    }

    /// Get a mutable node by ID.
    ///
    /// Labels must be added through [`GraphStore::add_label_to_node`] so the
    /// label index stays consistent.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.as_u64() as usize)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        (id.as_u64() as usize) < self.nodes.len()
    }

    /// Add a label to an existing node
    pub fn add_label_to_node(&mut self, id: NodeId, label: impl Into<Label>) -> GraphResult<()> {
        let label = label.into();
        let node = self.nodes.get_mut(id.as_u64() as usize).ok_or(GraphError::NodeNotFound(id))?;
        if !node.has_label(&label) {
            node.add_label(label.clone());
            self.label_index.entry(label).or_default().push(id);
        }
        Ok(())
    }

    /// Create a directed edge between two existing nodes
    pub fn create_edge(&mut self, source: NodeId, target: NodeId, edge_type: impl Into<EdgeType>) -> GraphResult<EdgeId> {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(edge_id, source, target, edge_type));
        self.outgoing[source.as_u64() as usize].push(edge_id);
        Ok(edge_id)
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize)
    }

    /// Get a mutable edge by ID
    pub fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.as_u64() as usize)
    }

    /// Outgoing edges of a node, in creation order
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(node_id.as_u64() as usize)
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Nodes carrying `label`, in creation order
    pub fn get_nodes_by_label(&self, label: &Label) -> Vec<&Node> {
        self.label_index
            .get(label)
            .map(|ids| ids.iter().filter_map(|id| self.get_node(*id)).collect())
            .unwrap_or_default()
    }

    /// All nodes, in creation order
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Distinct labels in use, sorted
    pub fn labels(&self) -> Vec<Label> {
        self.label_index
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(label, _)| label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct relationship types in use, sorted
    pub fn edge_types(&self) -> Vec<EdgeType> {
        self.edges
            .iter()
            .map(|e| e.edge_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.label_index.clear();
    }
}

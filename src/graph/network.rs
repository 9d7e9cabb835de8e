//! In-memory network storage
//!
//! The edge list is the single source of truth for adjacency. Each node's
//! neighbor cache is derived from it by [`Network::rebuild_connections`] and
//! is never written anywhere else.
//!
//! Lookup structures:
//! - `node_index`: NodeId -> position in `nodes`
//! - `edge_index`: set of orientation-free pairs present in `edges`

use super::edge::{Edge, EdgeKey};
use super::node::Node;
use super::types::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Errors that can occur during network mutation
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Self-loop on node {0} rejected")]
    SelfLoop(NodeId),

    #[error("Edge between {0} and {1} already exists")]
    DuplicateEdge(NodeId, NodeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Nodes and undirected edges of the simulated organization
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: FxHashMap<NodeId, usize>,
    edge_index: FxHashSet<EdgeKey>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn node_at(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    /// Mutable node slice plus read-only edges, for the layout pass.
    ///
    /// Node neighbor caches stay read-only through this borrow.
    pub fn layout_parts(&mut self) -> (&mut [Node], &[Edge]) {
        (self.nodes.as_mut_slice(), self.edges.as_slice())
    }

    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeId> {
        let id = node.id;
        if self.node_index.contains_key(&id) {
            return Err(GraphError::NodeAlreadyExists(id));
        }
        self.node_index.insert(id, self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_index.contains(&EdgeKey::new(a, b))
    }

    /// Insert an edge, rejecting self-loops, unknown endpoints and
    /// duplicate unordered pairs.
    ///
    /// Neighbor caches are not touched; call [`Self::rebuild_connections`].
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if edge.source == edge.target {
            return Err(GraphError::SelfLoop(edge.source));
        }
        for endpoint in [edge.source, edge.target] {
            if !self.node_index.contains_key(&endpoint) {
                return Err(GraphError::NodeNotFound(endpoint));
            }
        }
        if !self.edge_index.insert(edge.key()) {
            return Err(GraphError::DuplicateEdge(edge.source, edge.target));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Remove the edge stored at `idx`. Edge order is not preserved.
    pub fn remove_edge_at(&mut self, idx: usize) -> Option<Edge> {
        if idx >= self.edges.len() {
            return None;
        }
        let edge = self.edges.swap_remove(idx);
        self.edge_index.remove(&edge.key());
        Some(edge)
    }

    /// Keep only edges matching `keep`; returns how many were removed
    pub fn retain_edges<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Edge) -> bool,
    {
        let before = self.edges.len();
        let edge_index = &mut self.edge_index;
        self.edges.retain(|edge| {
            let kept = keep(edge);
            if !kept {
                edge_index.remove(&edge.key());
            }
            kept
        });
        before - self.edges.len()
    }

    /// Apply `f` to every edge. Endpoints must not change.
    pub fn for_each_edge_mut<F>(&mut self, f: F)
    where
        F: FnMut(&mut Edge),
    {
        self.edges.iter_mut().for_each(f);
    }

    /// Recompute every node's neighbor cache strictly from the edge list.
    ///
    /// Edges naming an id that is not present are skipped.
    pub fn rebuild_connections(&mut self) {
        for node in &mut self.nodes {
            node.clear_connections();
        }
        for edge in &self.edges {
            let (Some(&s), Some(&t)) = (
                self.node_index.get(&edge.source),
                self.node_index.get(&edge.target),
            ) else {
                continue;
            };
            self.nodes[s].push_connection(edge.target);
            self.nodes[t].push_connection(edge.source);
        }
        for node in &mut self.nodes {
            node.finish_connections();
        }
    }

    /// Number of edges incident to `id`, counted from the edge list
    pub fn incident_edge_count(&self, id: NodeId) -> usize {
        self.edges.iter().filter(|edge| edge.touches(id)).count()
    }

    /// Drop every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.edge_index.clear();
    }
}

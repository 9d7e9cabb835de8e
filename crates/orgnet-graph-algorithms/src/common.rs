//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of an undirected graph topology for
//! algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of an undirected topology in Compressed
/// Sparse Row (CSR) format.
///
/// Every undirected edge `{u, v}` is stored twice, once in each endpoint's
/// neighbor slice. Neighbor slices are sorted and free of duplicates and
/// self-loops, so membership tests can binary-search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
}

impl GraphView {
    /// Build a view from a node list and an undirected edge list.
    ///
    /// Edges referring to ids outside `nodes` are skipped, as are self-loops
    /// and repeated pairs. A stale endpoint is not an error here: the view
    /// simply reflects what can be resolved.
    pub fn from_edges<I>(nodes: &[NodeId], edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let node_count = nodes.len();
        let mut node_to_index = HashMap::with_capacity(node_count);
        for (idx, &id) in nodes.iter().enumerate() {
            node_to_index.insert(id, idx);
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (a, b) in edges {
            let (Some(&u), Some(&v)) = (node_to_index.get(&a), node_to_index.get(&b)) else {
                continue;
            };
            if u == v {
                continue;
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        offsets.push(0);
        for mut neighbors in adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
            targets.extend(neighbors);
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node: nodes.to_vec(),
            node_to_index,
            offsets,
            targets,
        }
    }

    /// Degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Sorted neighbor indices of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Whether `u` and `v` are adjacent (by index)
    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Number of undirected edges in the view
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }
}

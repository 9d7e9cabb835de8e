//! Network statistics
//!
//! Density, degree statistics, clustering, transitivity and department
//! homophily derived from the current nodes and edges. Topology metrics go
//! through a [`GraphView`] built from the edge list.

use crate::graph::{Edge, Node, NodeId, RelationKind};
use orgnet_graph_algorithms::{
    average_clustering, connected_components, degree_histogram, global_transitivity, GraphView,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Edge counts per relationship type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeKindCounts {
    pub formal: usize,
    pub informal: usize,
    pub collaborative: usize,
}

impl EdgeKindCounts {
    pub fn get(&self, kind: RelationKind) -> usize {
        match kind {
            RelationKind::Formal => self.formal,
            RelationKind::Informal => self.informal,
            RelationKind::Collaborative => self.collaborative,
        }
    }

    fn record(&mut self, kind: RelationKind) {
        match kind {
            RelationKind::Formal => self.formal += 1,
            RelationKind::Informal => self.informal += 1,
            RelationKind::Collaborative => self.collaborative += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// `|E| / C(|V|, 2)`; 0 below two nodes
    pub density: f64,
    /// `2|E| / |V|`; 0 for an empty network
    pub average_degree: f64,
    pub max_degree: usize,
    /// Mean local clustering over nodes with degree > 1
    pub clustering_coefficient: f64,
    /// Global transitivity, `3 × triangles / connected triples`
    pub transitivity: f64,
    /// Not computed; always 0
    pub assortativity: f64,
    /// Not computed; always 0
    pub reciprocity: f64,
    /// Fraction of edges within one department
    pub department_homophily: f64,
    /// Degree value -> number of nodes
    pub degree_distribution: BTreeMap<usize, usize>,
    pub edge_kinds: EdgeKindCounts,
    /// Connected components, isolated nodes included
    pub component_count: usize,
}

#[derive(Debug, Default)]
pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn new() -> Self {
        StatisticsEngine
    }

    pub fn compute(&self, nodes: &[Node], edges: &[Edge]) -> NetworkStatistics {
        let node_count = nodes.len();
        let edge_count = edges.len();

        let ids: Vec<u64> = nodes.iter().map(|n| n.id.as_u64()).collect();
        let view = GraphView::from_edges(
            &ids,
            edges.iter().map(|e| (e.source.as_u64(), e.target.as_u64())),
        );

        let max_pairs = node_count * node_count.saturating_sub(1) / 2;
        let density = if max_pairs > 0 {
            edge_count as f64 / max_pairs as f64
        } else {
            0.0
        };
        let average_degree = if node_count > 0 {
            (2 * edge_count) as f64 / node_count as f64
        } else {
            0.0
        };

        let degree_distribution = degree_histogram(&view);
        let max_degree = degree_distribution.keys().next_back().copied().unwrap_or(0);

        NetworkStatistics {
            node_count,
            edge_count,
            density,
            average_degree,
            max_degree,
            clustering_coefficient: average_clustering(&view),
            transitivity: global_transitivity(&view),
            assortativity: 0.0,
            reciprocity: 0.0,
            department_homophily: department_homophily(nodes, edges),
            degree_distribution,
            edge_kinds: edge_kind_counts(edges),
            component_count: connected_components(&view).component_count(),
        }
    }
}

/// Fraction of edges whose endpoints share a department; 0 with no edges.
///
/// Edges naming an unknown node count toward the denominator only.
pub fn department_homophily(nodes: &[Node], edges: &[Edge]) -> f64 {
    if edges.is_empty() {
        return 0.0;
    }
    let departments: FxHashMap<NodeId, _> =
        nodes.iter().map(|n| (n.id, n.department())).collect();

    let same = edges
        .iter()
        .filter(|edge| {
            match (departments.get(&edge.source), departments.get(&edge.target)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        })
        .count();
    same as f64 / edges.len() as f64
}

fn edge_kind_counts(edges: &[Edge]) -> EdgeKindCounts {
    let mut counts = EdgeKindCounts::default();
    for edge in edges {
        counts.record(edge.kind);
    }
    counts
}

//! Immutable projections of the simulation state for rendering and metrics
//! collaborators.

use super::stats::NetworkStatistics;
use crate::graph::{Department, Network, NodeId, RelationKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeProjection {
    pub id: NodeId,
    pub position: [f64; 3],
    pub department: Department,
    pub degree: usize,
    pub color: &'static str,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeProjection {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: RelationKind,
    pub strength: f64,
}

/// Owned copy of the state after a tick; later ticks never alter it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub time: f64,
    pub nodes: Vec<NodeProjection>,
    pub edges: Vec<EdgeProjection>,
    pub statistics: NetworkStatistics,
}

impl StateSnapshot {
    pub fn capture(network: &Network, time: f64, statistics: &NetworkStatistics) -> Self {
        let nodes = network
            .nodes()
            .iter()
            .map(|node| NodeProjection {
                id: node.id,
                position: node.position,
                department: node.department(),
                degree: node.degree(),
                color: node.color(),
                size: node.size,
            })
            .collect();

        let edges = network
            .edges()
            .iter()
            .map(|edge| EdgeProjection {
                source: edge.source,
                target: edge.target,
                kind: edge.kind,
                strength: edge.strength,
            })
            .collect();

        StateSnapshot {
            time,
            nodes,
            edges,
            statistics: statistics.clone(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeProjection> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

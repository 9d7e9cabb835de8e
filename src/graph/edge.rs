//! Undirected relationship edge
//!
//! An edge joins two distinct people, carries a relationship type and a
//! strength that decays as the edge ages.

use super::types::{NodeId, RelationKind};
use serde::{Deserialize, Serialize};

/// Edges whose strength falls to or below this value are pruned.
pub const PRUNE_THRESHOLD: f64 = 0.1;

/// Orientation-free identity of an edge: `(min, max)` of its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }

    pub fn low(&self) -> NodeId {
        self.0
    }

    pub fn high(&self) -> NodeId {
        self.1
    }
}

/// A relationship between two people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,

    /// Static cosmetic weight in [0, 1]
    pub weight: f64,

    pub kind: RelationKind,

    /// Strength in (0, 1]; decays each tick
    pub strength: f64,

    /// Simulation time accumulated since creation
    pub age: f64,
}

impl Edge {
    pub fn new(
        source: NodeId,
        target: NodeId,
        kind: RelationKind,
        weight: f64,
        strength: f64,
    ) -> Self {
        Edge {
            source,
            target,
            weight: weight.clamp(0.0, 1.0),
            kind,
            strength: strength.clamp(0.0, 1.0),
            age: 0.0,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target)
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.source == node1 && self.target == node2)
            || (self.source == node2 && self.target == node1)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    /// Advance age by `dt` and decay strength by `decay · dt`
    pub fn age_by(&mut self, dt: f64, decay: f64) {
        self.age += dt;
        self.strength *= (1.0 - decay * dt).clamp(0.0, 1.0);
    }

    pub fn is_prunable(&self) -> bool {
        self.strength <= PRUNE_THRESHOLD
    }
}

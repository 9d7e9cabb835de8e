//! Force-directed spatial layout
//!
//! Each step accumulates, for every node:
//! - repulsion from every other node closer than the cutoff, `∝ 1/d²`
//! - attraction along each incident edge beyond a minimum distance, `∝ strength`
//! - a weak pull toward the origin
//!
//! then integrates velocity (with damping) and position.
//!
//! Repulsion is all-pairs, O(n²) per step. Target networks are tens to a few
//! hundred nodes.

use crate::config::LayoutConfig;
use crate::graph::{Edge, Node, NodeId};
use rustc_hash::FxHashMap;

type Vec3 = [f64; 3];

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn add_scaled(acc: &mut Vec3, v: Vec3, scale: f64) {
    for i in 0..3 {
        acc[i] += v[i] * scale;
    }
}

fn length(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[derive(Debug, Clone, Default)]
pub struct SpatialLayoutEngine {
    config: LayoutConfig,
}

impl SpatialLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Net force on every node, from positions as they stand before the step
    pub fn forces(&self, nodes: &[Node], edges: &[Edge]) -> Vec<Vec3> {
        let cfg = &self.config;
        let mut forces = vec![[0.0; 3]; nodes.len()];

        for (i, node) in nodes.iter().enumerate() {
            for (j, other) in nodes.iter().enumerate() {
                if i == j {
                    continue;
                }
                let offset = sub(node.position, other.position);
                let distance = length(offset);
                if distance > 0.0 && distance < cfg.repulsion_cutoff {
                    let magnitude = cfg.repulsion_strength / (distance * distance);
                    add_scaled(&mut forces[i], offset, magnitude / distance);
                }
            }
        }

        let index: FxHashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();

        for edge in edges {
            // Endpoint missing from the node list: skip
            let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) else {
                continue;
            };
            let offset = sub(nodes[t].position, nodes[s].position);
            let distance = length(offset);
            if distance > cfg.attraction_min_distance {
                let magnitude = cfg.attraction_strength * edge.strength / distance;
                add_scaled(&mut forces[s], offset, magnitude);
                add_scaled(&mut forces[t], offset, -magnitude);
            }
        }

        for (force, node) in forces.iter_mut().zip(nodes) {
            add_scaled(force, node.position, -cfg.centering_strength);
        }

        forces
    }

    /// Advance every node's velocity and position by `dt`
    pub fn step(&self, nodes: &mut [Node], edges: &[Edge], dt: f64) {
        let forces = self.forces(nodes, edges);
        let damping = self.config.damping;

        for (node, force) in nodes.iter_mut().zip(forces) {
            for axis in 0..3 {
                node.velocity[axis] = (node.velocity[axis] + force[axis] * dt) * damping;
                node.position[axis] += node.velocity[axis] * dt;
            }
        }
    }
}

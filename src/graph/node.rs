//! Person node of the organizational network
//!
//! A node carries:
//! - A unique, monotonically allocated id
//! - Position and velocity in 3D layout space
//! - Categorical and continuous attributes (department, seniority, skills, performance)
//! - A derived neighbor cache, rebuilt from the edge list by [`Network`](super::Network)

use super::types::{Department, NodeId};
use serde::{Deserialize, Serialize};

/// Attributes of a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub department: Department,
    /// Continuous seniority in [0, 10)
    pub seniority: f64,
    /// Subset of the department's skill catalog
    pub skills: Vec<String>,
    /// Performance in [0, 1]
    pub performance: f64,
}

impl Attributes {
    /// Jaccard similarity of the two skill sets; 0.0 when both are empty
    pub fn skill_similarity(&self, other: &Attributes) -> f64 {
        let shared = self
            .skills
            .iter()
            .filter(|skill| other.skills.contains(skill))
            .count();
        let distinct_other = other
            .skills
            .iter()
            .filter(|skill| !self.skills.contains(skill))
            .count();
        let union = self.skills.len() + distinct_other;
        if union == 0 {
            return 0.0;
        }
        shared as f64 / union as f64
    }
}

/// A person in the network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Position in layout space
    pub position: [f64; 3],

    /// Velocity in layout space
    pub velocity: [f64; 3],

    pub attributes: Attributes,

    /// Render size hint
    pub size: f64,

    /// Sorted neighbor ids. Derived; only [`Network::rebuild_connections`](super::Network::rebuild_connections) writes it.
    connections: Vec<NodeId>,
}

impl Node {
    /// Create a node at rest at `position` with an empty neighbor cache
    pub fn new(id: NodeId, attributes: Attributes, position: [f64; 3]) -> Self {
        let size = Self::size_for(attributes.performance);
        Node {
            id,
            position,
            velocity: [0.0; 3],
            attributes,
            size,
            connections: Vec::new(),
        }
    }

    /// Render size derived from performance: 0.2 at the performance floor
    /// (0.5), 0.5 at the ceiling (1.0).
    pub fn size_for(performance: f64) -> f64 {
        let normalized = ((performance - 0.5) / 0.5).clamp(0.0, 1.0);
        0.2 + 0.3 * normalized
    }

    pub fn department(&self) -> Department {
        self.attributes.department
    }

    /// Render color, keyed to the department
    pub fn color(&self) -> &'static str {
        self.attributes.department.color()
    }

    /// Neighbor ids as of the last cache rebuild
    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }

    /// Degree as of the last cache rebuild
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.connections.binary_search(&other).is_ok()
    }

    /// Size of the intersection of both neighbor caches
    pub fn mutual_connections(&self, other: &Node) -> usize {
        let (mut i, mut j, mut count) = (0, 0, 0);
        let (a, b) = (&self.connections, &other.connections);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    }

    pub fn shares_department(&self, other: &Node) -> bool {
        self.attributes.department == other.attributes.department
    }

    pub(crate) fn clear_connections(&mut self) {
        self.connections.clear();
    }

    pub(crate) fn push_connection(&mut self, id: NodeId) {
        self.connections.push(id);
    }

    pub(crate) fn finish_connections(&mut self) {
        self.connections.sort_unstable();
        self.connections.dedup();
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

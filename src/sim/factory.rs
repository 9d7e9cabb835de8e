//! Node construction with randomized attributes

use crate::graph::{Attributes, Department, Node, NodeId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Edge length of the cube, centred on the origin, that new nodes are
/// scattered in.
pub const INITIAL_SPREAD: f64 = 25.0;

/// Allocates node ids and builds nodes with random attributes.
///
/// Ids increase monotonically and are never reused until [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct NodeFactory {
    next_id: u64,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next created node will receive
    pub fn next_id(&self) -> NodeId {
        NodeId::new(self.next_id)
    }

    /// Restart id allocation at 0
    pub fn reset(&mut self) {
        self.next_id = 0;
    }

    pub fn create<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Node {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;

        let department = *Department::ALL
            .choose(rng)
            .unwrap_or(&Department::Engineering);
        let catalog = department.skills();
        let skill_count = rng.gen_range(1..=catalog.len());

        let attributes = Attributes {
            department,
            seniority: rng.gen_range(0.0..10.0),
            skills: catalog[..skill_count].iter().map(|s| s.to_string()).collect(),
            performance: 0.5 + rng.gen::<f64>() * 0.5,
        };

        let mut position = [0.0; 3];
        for coord in &mut position {
            *coord = (rng.gen::<f64>() - 0.5) * INITIAL_SPREAD;
        }

        Node::new(id, attributes, position)
    }
}

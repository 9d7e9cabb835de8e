//! Organizational network data model
//!
//! - People as nodes with department, seniority, skills and performance
//! - Undirected, typed relationships with decaying strength
//! - At most one edge per unordered pair, no self-loops
//! - Neighbor caches derived from the edge list on demand

pub mod edge;
pub mod network;
pub mod node;
pub mod types;

// Re-export main types
pub use edge::{Edge, EdgeKey, PRUNE_THRESHOLD};
pub use network::{GraphError, GraphResult, Network};
pub use node::{Attributes, Node};
pub use types::{Department, NodeId, RelationKind};

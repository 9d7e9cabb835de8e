//! Orgnet: organizational network simulator
//!
//! A stochastic generative graph process in the spirit of Exponential Random
//! Graph Models. People are nodes with department, seniority, skills and
//! performance; relationships are undirected edges whose formation depends
//! on density, homophily, preferential attachment, clustering and skill
//! similarity. The network evolves tick by tick (growth, perturbation,
//! aging, pruning) while a force-directed layout embeds it in 3D space.
//!
//! # Modules
//!
//! - [`graph`]: nodes, edges and the [`Network`] container
//! - [`config`]: [`ErgmParameters`] and [`LayoutConfig`]
//! - [`sim`]: the engine and its [`SimulationController`]
//!
//! ## Example Usage
//!
//! ```rust
//! use orgnet::{ErgmParameters, SimulationController};
//!
//! let params = ErgmParameters {
//!     node_count: 20,
//!     density: 0.2,
//!     ..Default::default()
//! };
//! let mut sim = SimulationController::seeded(params, 7);
//!
//! for _ in 0..10 {
//!     sim.step();
//! }
//!
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.nodes.len(), 20);
//! assert!(snapshot.statistics.density <= 1.0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod sim;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, ErgmParameters, LayoutConfig};
pub use graph::{
    Attributes, Department, Edge, EdgeKey, GraphError, GraphResult, Network, Node, NodeId,
    RelationKind,
};
pub use sim::{
    EvolutionReport, NetworkStatistics, SimulationController, SimulationDriver, StateSnapshot,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

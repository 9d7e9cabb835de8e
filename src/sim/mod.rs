//! Simulation engine
//!
//! - [`NodeFactory`]: people with random attributes
//! - [`EdgeFormationModel`]: edge probability and relationship type
//! - [`SpatialLayoutEngine`]: force-directed 3D layout
//! - [`NetworkEvolver`]: growth, perturbation, aging, pruning
//! - [`StatisticsEngine`]: network metrics
//! - [`SimulationController`]: owns the state and sequences a tick
//! - [`SimulationDriver`]: frame-driven playback and reset signals

pub mod controller;
pub mod driver;
pub mod evolution;
pub mod factory;
pub mod formation;
pub mod layout;
pub mod snapshot;
pub mod stats;

pub use controller::SimulationController;
pub use driver::SimulationDriver;
pub use evolution::{EvolutionReport, NetworkEvolver, Perturbation};
pub use factory::NodeFactory;
pub use formation::EdgeFormationModel;
pub use layout::SpatialLayoutEngine;
pub use snapshot::{EdgeProjection, NodeProjection, StateSnapshot};
pub use stats::{EdgeKindCounts, NetworkStatistics, StatisticsEngine};

//! Simulation controller
//!
//! Owns the network, parameters, clock and random source, and sequences the
//! other components once per tick:
//!
//! growth -> layout -> perturbation -> aging -> pruning -> cache rebuild -> statistics
//!
//! The controller has no clock of its own. Callers decide when to call
//! [`SimulationController::step`]; pausing is not calling it. One driving
//! loop per instance: the controller is not internally synchronized.

use super::evolution::{sample_distinct_pair, EvolutionReport, NetworkEvolver};
use super::factory::NodeFactory;
use super::formation::EdgeFormationModel;
use super::layout::SpatialLayoutEngine;
use super::snapshot::StateSnapshot;
use super::stats::{NetworkStatistics, StatisticsEngine};
use crate::config::{ErgmParameters, LayoutConfig};
use crate::graph::Network;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

pub struct SimulationController<R = StdRng> {
    params: ErgmParameters,
    network: Network,
    factory: NodeFactory,
    layout: SpatialLayoutEngine,
    evolver: NetworkEvolver,
    stats_engine: StatisticsEngine,
    statistics: NetworkStatistics,
    last_report: EvolutionReport,
    time: f64,
    rng: R,
}

impl SimulationController<StdRng> {
    /// Controller with an entropy-seeded generator
    pub fn new(params: ErgmParameters) -> Self {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Reproducible controller
    pub fn seeded(params: ErgmParameters, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationController<R> {
    /// Build and initialize a controller drawing from `rng`
    pub fn with_rng(params: ErgmParameters, rng: R) -> Self {
        let mut controller = SimulationController {
            params: params.sanitized(),
            network: Network::new(),
            factory: NodeFactory::new(),
            layout: SpatialLayoutEngine::default(),
            evolver: NetworkEvolver::new(),
            stats_engine: StatisticsEngine::new(),
            statistics: NetworkStatistics::default(),
            last_report: EvolutionReport::default(),
            time: 0.0,
            rng,
        };
        controller.rebuild();
        controller
    }

    /// Replace the layout constants; takes effect on the next step
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = SpatialLayoutEngine::new(config);
        self
    }

    /// Discard all state and build a fresh network from `params`
    pub fn initialize(&mut self, params: ErgmParameters) -> StateSnapshot {
        self.params = params.sanitized();
        self.rebuild();
        self.snapshot()
    }

    /// Discard all state and rebuild from the current parameters.
    ///
    /// Node ids restart at 0.
    pub fn reset(&mut self) -> StateSnapshot {
        self.rebuild();
        self.snapshot()
    }

    /// Swap in new parameters for subsequent ticks.
    ///
    /// Existing edges are not re-evaluated.
    pub fn update_parameters(&mut self, params: ErgmParameters) {
        self.params = params.sanitized();
        debug!(params = ?self.params, "parameters updated");
    }

    /// Advance one tick and return the resulting state
    pub fn step(&mut self) -> StateSnapshot {
        let dt = self.params.time_step;
        self.time += dt;

        let mut report = self.evolver.grow(
            &mut self.network,
            &mut self.factory,
            &self.params,
            dt,
            &mut self.rng,
        );

        let (nodes, edges) = self.network.layout_parts();
        self.layout.step(nodes, edges, dt);

        report += self
            .evolver
            .evolve(&mut self.network, &self.params, dt, &mut self.rng);

        self.statistics = self
            .stats_engine
            .compute(self.network.nodes(), self.network.edges());
        self.last_report = report;

        debug!(
            time = self.time,
            nodes = self.network.node_count(),
            edges = self.network.edge_count(),
            added = report.edges_added,
            removed = report.edges_removed,
            pruned = report.edges_pruned,
            "tick"
        );

        self.snapshot()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.network, self.time, &self.statistics)
    }

    pub fn params(&self) -> &ErgmParameters {
        &self.params
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn statistics(&self) -> &NetworkStatistics {
        &self.statistics
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Changes made by the most recent tick
    pub fn last_report(&self) -> EvolutionReport {
        self.last_report
    }

    fn rebuild(&mut self) {
        self.network.clear();
        self.factory.reset();
        self.time = 0.0;
        self.last_report = EvolutionReport::default();

        let initial_nodes = if self.params.growth_mode {
            0
        } else {
            self.params.node_count
        };
        for _ in 0..initial_nodes {
            let node = self.factory.create(&mut self.rng);
            // Fresh ids from a reset factory cannot collide
            let _ = self.network.add_node(node);
        }

        let (attempts, accepted) = self.seed_edges();
        self.network.rebuild_connections();
        self.statistics = self
            .stats_engine
            .compute(self.network.nodes(), self.network.edges());

        info!(
            nodes = self.network.node_count(),
            edges = accepted,
            attempts,
            growth_mode = self.params.growth_mode,
            "network initialized"
        );
    }

    /// Bounded random sampling of initial edges.
    ///
    /// Draws up to `3 × floor(density · C(n, 2))` random pairs and runs the
    /// accept test on each pair not yet linked. Caches are rebuilt after each
    /// accepted edge so degree and mutual-neighbor effects see the edges
    /// formed so far. Returns `(attempts, accepted)`.
    fn seed_edges(&mut self) -> (usize, usize) {
        let n = self.network.node_count();
        if n < 2 {
            return (0, 0);
        }
        let max_pairs = (n * (n - 1) / 2) as f64;
        let target_edges = (self.params.density * max_pairs).floor() as usize;
        let attempts = target_edges * 3;

        let model = EdgeFormationModel::new(&self.params);
        let mut accepted = 0;
        for _ in 0..attempts {
            let (s, t) = sample_distinct_pair(n, &mut self.rng);
            let (Some(source), Some(target)) = (self.network.node_at(s), self.network.node_at(t))
            else {
                continue;
            };
            if self.network.contains_edge(source.id, target.id) {
                continue;
            }
            if !model.accept(source, target, n, &mut self.rng) {
                continue;
            }
            let edge = model.form_edge(source, target, &mut self.rng);
            if self.network.insert_edge(edge).is_ok() {
                accepted += 1;
                self.network.rebuild_connections();
            }
        }
        (attempts, accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(node_count: usize, density: f64) -> ErgmParameters {
        ErgmParameters {
            node_count,
            density,
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_population() {
        let controller = SimulationController::seeded(small(20, 0.3), 1);
        assert_eq!(controller.network().node_count(), 20);
        assert_eq!(controller.time(), 0.0);
        assert_eq!(controller.statistics().node_count, 20);
        assert_eq!(controller.statistics().edge_count, controller.network().edge_count());
    }

    #[test]
    fn test_growth_mode_starts_empty() {
        let params = ErgmParameters {
            growth_mode: true,
            ..small(20, 0.3)
        };
        let controller = SimulationController::seeded(params, 2);
        assert_eq!(controller.network().node_count(), 0);
        assert_eq!(controller.statistics().density, 0.0);
    }

    #[test]
    fn test_step_advances_time() {
        let mut controller = SimulationController::seeded(small(10, 0.2), 3);
        let first = controller.step();
        let second = controller.step();
        assert!((first.time - 0.1).abs() < 1e-12);
        assert!((second.time - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut controller = SimulationController::seeded(small(10, 0.5), 4);
        let before = controller.step();
        let copy = before.clone();
        for _ in 0..20 {
            controller.step();
        }
        assert_eq!(before, copy);
        assert_ne!(controller.snapshot().time, before.time);
    }

    #[test]
    fn test_update_parameters_sanitizes() {
        let mut controller = SimulationController::seeded(small(10, 0.2), 5);
        let edges_before = controller.network().edge_count();
        controller.update_parameters(ErgmParameters {
            density: 4.0,
            ..small(10, 0.2)
        });
        assert_eq!(controller.params().density, 1.0);
        // Existing edges are untouched
        assert_eq!(controller.network().edge_count(), edges_before);
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = SimulationController::seeded(small(15, 0.3), 42);
        let mut b = SimulationController::seeded(small(15, 0.3), 42);
        for _ in 0..25 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn test_with_layout_applies_config() {
        let frozen = LayoutConfig {
            damping: 0.0,
            ..Default::default()
        };
        let params = ErgmParameters {
            perturbation_rate: 0.0,
            ..small(10, 0.3)
        };
        let mut controller = SimulationController::seeded(params, 12).with_layout(frozen);
        let before = controller.snapshot();
        let after = controller.step();
        for (a, b) in before.nodes.iter().zip(&after.nodes) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn test_initialize_with_new_params() {
        let mut controller = SimulationController::seeded(small(10, 0.2), 6);
        for _ in 0..5 {
            controller.step();
        }
        let snapshot = controller.initialize(small(4, 0.0));
        assert_eq!(snapshot.nodes.len(), 4);
        assert!(snapshot.edges.is_empty());
        assert_eq!(snapshot.time, 0.0);
    }
}

//! Per-tick structural change
//!
//! Fixed order within a tick:
//! 1. growth (growth mode only)
//! 2. random perturbation: add one edge or remove one edge
//! 3. aging and strength decay
//! 4. pruning of weak edges
//! 5. neighbor cache rebuild from the edge list
//!
//! The controller runs the spatial layout between growth and perturbation,
//! so the two halves are exposed separately as [`NetworkEvolver::grow`] and
//! [`NetworkEvolver::evolve`].

use super::factory::NodeFactory;
use super::formation::EdgeFormationModel;
use crate::config::ErgmParameters;
use crate::graph::Network;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Share of perturbations that try to add an edge (the rest remove one)
const PERTURBATION_ADD_SHARE: f64 = 0.6;

/// What a tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub nodes_added: usize,
    pub edges_added: usize,
    pub edges_removed: usize,
    pub edges_pruned: usize,
}

impl std::ops::AddAssign for EvolutionReport {
    fn add_assign(&mut self, other: EvolutionReport) {
        self.nodes_added += other.nodes_added;
        self.edges_added += other.edges_added;
        self.edges_removed += other.edges_removed;
        self.edges_pruned += other.edges_pruned;
    }
}

/// Outcome of a single perturbation draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbation {
    Idle,
    /// A pair was sampled; `accepted` if the edge was created
    AddAttempt { accepted: bool },
    Removed,
}

#[derive(Debug, Default)]
pub struct NetworkEvolver;

impl NetworkEvolver {
    pub fn new() -> Self {
        NetworkEvolver
    }

    /// Full tick without layout: [`Self::grow`] then [`Self::evolve`]
    pub fn step<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        factory: &mut NodeFactory,
        params: &ErgmParameters,
        dt: f64,
        rng: &mut R,
    ) -> EvolutionReport {
        let mut report = self.grow(network, factory, params, dt, rng);
        report += self.evolve(network, params, dt, rng);
        report
    }

    /// With probability `growth_rate · dt`, add one person and try to link
    /// them to every existing node.
    ///
    /// No-op unless growth mode is on and the population is below target.
    pub fn grow<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        factory: &mut NodeFactory,
        params: &ErgmParameters,
        dt: f64,
        rng: &mut R,
    ) -> EvolutionReport {
        let mut report = EvolutionReport::default();
        let params = params.sanitized();
        if !params.growth_mode || network.node_count() >= params.node_count {
            return report;
        }
        if !rng.gen_bool((params.growth_rate * dt).clamp(0.0, 1.0)) {
            return report;
        }

        let newcomer = factory.create(rng);
        let newcomer_id = newcomer.id;
        if network.add_node(newcomer.clone()).is_err() {
            return report;
        }
        report.nodes_added = 1;

        let model = EdgeFormationModel::new(&params);
        let node_count = network.node_count();
        let mut candidates = Vec::new();
        for existing in network.nodes() {
            if existing.id == newcomer_id {
                continue;
            }
            if model.accept(&newcomer, existing, node_count, rng) {
                candidates.push(model.form_edge(&newcomer, existing, rng));
            }
        }
        for edge in candidates {
            if network.insert_edge(edge).is_ok() {
                report.edges_added += 1;
            }
        }

        trace!(node = %newcomer_id, edges = report.edges_added, "node joined");
        report
    }

    /// Perturbation, aging, pruning and cache rebuild
    pub fn evolve<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        params: &ErgmParameters,
        dt: f64,
        rng: &mut R,
    ) -> EvolutionReport {
        let params = params.sanitized();
        let mut report = EvolutionReport::default();

        match self.perturb(network, &params, rng) {
            Perturbation::AddAttempt { accepted: true } => report.edges_added += 1,
            Perturbation::Removed => report.edges_removed += 1,
            _ => {}
        }

        self.age(network, params.temporal_decay, dt);
        report.edges_pruned = self.prune(network);
        network.rebuild_connections();
        report
    }

    /// With probability `perturbation_rate`, either sample one random pair
    /// and run the accept test on it, or delete one random edge.
    pub fn perturb<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        params: &ErgmParameters,
        rng: &mut R,
    ) -> Perturbation {
        if !rng.gen_bool(params.perturbation_rate.clamp(0.0, 1.0)) {
            return Perturbation::Idle;
        }

        if rng.gen_bool(PERTURBATION_ADD_SHARE) {
            let accepted = self.try_random_edge(network, params, rng);
            trace!(accepted, "perturbation: add attempt");
            Perturbation::AddAttempt { accepted }
        } else if network.edge_count() == 0 {
            Perturbation::Idle
        } else {
            let idx = rng.gen_range(0..network.edge_count());
            if let Some(edge) = network.remove_edge_at(idx) {
                trace!(source = %edge.source, target = %edge.target, "perturbation: edge removed");
            }
            Perturbation::Removed
        }
    }

    fn try_random_edge<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        params: &ErgmParameters,
        rng: &mut R,
    ) -> bool {
        let n = network.node_count();
        if n < 2 {
            return false;
        }
        let (s, t) = sample_distinct_pair(n, rng);
        let (Some(source), Some(target)) = (network.node_at(s), network.node_at(t)) else {
            return false;
        };
        if network.contains_edge(source.id, target.id) {
            return false;
        }

        let model = EdgeFormationModel::new(params);
        if !model.accept(source, target, n, rng) {
            return false;
        }
        let edge = model.form_edge(source, target, rng);
        network.insert_edge(edge).is_ok()
    }

    /// Every edge ages by `dt`; strength decays by `decay · dt`
    pub fn age(&self, network: &mut Network, decay: f64, dt: f64) {
        network.for_each_edge_mut(|edge| edge.age_by(dt, decay));
    }

    /// Remove every edge at or below the prune threshold
    pub fn prune(&self, network: &mut Network) -> usize {
        network.retain_edges(|edge| !edge.is_prunable())
    }
}

/// Two distinct indices in `0..n`, uniformly over ordered pairs. `n >= 2`.
pub(crate) fn sample_distinct_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let s = rng.gen_range(0..n);
    let mut t = rng.gen_range(0..n - 1);
    if t >= s {
        t += 1;
    }
    (s, t)
}

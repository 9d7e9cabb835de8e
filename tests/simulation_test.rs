use orgnet::graph::{Edge, Network, NodeId, RelationKind, PRUNE_THRESHOLD};
use orgnet::sim::{NetworkEvolver, NodeFactory, StateSnapshot};
use orgnet::{ErgmParameters, SimulationController};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn assert_invariants(sim: &SimulationController, snapshot: &StateSnapshot) {
    let network = sim.network();

    let mut pairs = HashSet::new();
    for edge in network.edges() {
        assert_ne!(edge.source, edge.target, "self-loop on {}", edge.source);
        assert!(pairs.insert(edge.key()), "duplicate edge {:?}", edge.key());
        assert!(edge.strength > PRUNE_THRESHOLD && edge.strength <= 1.0);
    }

    for node in network.nodes() {
        assert_eq!(node.degree(), network.incident_edge_count(node.id));
        assert_eq!(snapshot.node(node.id).map(|p| p.degree), Some(node.degree()));
    }
    for projection in &snapshot.nodes {
        assert_eq!(projection.degree, network.incident_edge_count(projection.id));
    }

    let stats = &snapshot.statistics;
    if stats.node_count >= 2 {
        assert!((0.0..=1.0).contains(&stats.density));
    } else {
        assert_eq!(stats.density, 0.0);
    }
    assert!((0.0..=1.0).contains(&stats.clustering_coefficient));
    assert!((0.0..=1.0).contains(&stats.department_homophily));
    assert_eq!(stats.edge_count, network.edge_count());
}

#[test]
fn test_invariants_hold_every_tick() {
    let params = ErgmParameters {
        node_count: 30,
        density: 0.25,
        temporal_decay: 0.05,
        perturbation_rate: 0.5,
        ..Default::default()
    };
    let mut sim = SimulationController::seeded(params, 2024);
    let initial = sim.snapshot();
    assert_invariants(&sim, &initial);

    for _ in 0..400 {
        let snapshot = sim.step();
        assert_invariants(&sim, &snapshot);
    }
}

#[test]
fn test_invariants_hold_while_growing() {
    let params = ErgmParameters {
        node_count: 25,
        density: 0.3,
        growth_mode: true,
        growth_rate: 1.0,
        perturbation_rate: 0.3,
        ..Default::default()
    };
    let mut sim = SimulationController::seeded(params, 77);
    for _ in 0..500 {
        let snapshot = sim.step();
        assert_invariants(&sim, &snapshot);
    }
}

#[test]
fn test_dense_initialization_nearly_complete() {
    // 10 nodes, 45 pairs, 135 sampling attempts all accepted
    let params = ErgmParameters {
        node_count: 10,
        density: 1.0,
        homophily: 0.0,
        preferential_attachment: 0.0,
        clustering: 0.0,
        ..Default::default()
    };
    for seed in 0..10 {
        let sim = SimulationController::seeded(params.clone(), seed);
        let stats = sim.statistics();
        assert!(stats.edge_count <= 45);
        assert!(stats.edge_count >= 36, "seed {}: only {} edges", seed, stats.edge_count);
        assert!(stats.density >= 0.8);
    }
}

#[test]
fn test_zero_density_stays_empty() {
    let params = ErgmParameters {
        node_count: 5,
        density: 0.0,
        perturbation_rate: 1.0,
        ..Default::default()
    };
    let mut sim = SimulationController::seeded(params, 9);
    let stats = sim.statistics();
    assert_eq!(stats.edge_count, 0);
    assert_eq!(stats.density, 0.0);
    assert_eq!(stats.clustering_coefficient, 0.0);

    for _ in 0..100 {
        let snapshot = sim.step();
        assert!(snapshot.edges.is_empty());
        assert_eq!(snapshot.statistics.clustering_coefficient, 0.0);
    }
}

#[test]
fn test_growth_is_monotone_and_bounded() {
    let params = ErgmParameters {
        node_count: 40,
        density: 0.1,
        growth_mode: true,
        growth_rate: 1.0,
        time_step: 0.1,
        ..Default::default()
    };
    let mut sim = SimulationController::seeded(params, 5);
    assert_eq!(sim.network().node_count(), 0);

    let mut previous = 0;
    for _ in 0..1_000 {
        let snapshot = sim.step();
        let count = snapshot.nodes.len();
        assert!(count >= previous);
        assert!(count <= 40);
        previous = count;
    }
    // growth_rate · dt = 0.1 per tick; 1000 ticks all but guarantee the target
    assert_eq!(previous, 40);

    let ids: Vec<u64> = sim.network().nodes().iter().map(|n| n.id.as_u64()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_decayed_edge_pruned_on_exact_tick() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut factory = NodeFactory::new();
    let mut network = Network::new();
    for _ in 0..2 {
        network.add_node(factory.create(&mut rng)).unwrap();
    }
    network
        .insert_edge(Edge::new(NodeId::new(0), NodeId::new(1), RelationKind::Formal, 0.5, 0.5))
        .unwrap();

    let params = ErgmParameters {
        temporal_decay: 0.05,
        perturbation_rate: 0.0,
        ..Default::default()
    };
    let dt = 0.1;

    let mut expected_strength: f64 = 0.5;
    let mut removal_tick = 0;
    while expected_strength > PRUNE_THRESHOLD {
        expected_strength *= (1.0 - params.temporal_decay * dt).clamp(0.0, 1.0);
        removal_tick += 1;
    }
    assert_eq!(removal_tick, 322);

    let evolver = NetworkEvolver::new();
    for tick in 1..=removal_tick {
        let report = evolver.evolve(&mut network, &params, dt, &mut rng);
        if tick < removal_tick {
            assert_eq!(network.edge_count(), 1, "edge pruned early at tick {}", tick);
            assert_eq!(report.edges_pruned, 0);
        } else {
            assert_eq!(network.edge_count(), 0, "edge survived tick {}", tick);
            assert_eq!(report.edges_pruned, 1);
        }
    }
}

#[test]
fn test_reset_restarts_ids() {
    let params = ErgmParameters {
        node_count: 12,
        ..Default::default()
    };
    let mut sim = SimulationController::seeded(params, 31);
    for _ in 0..10 {
        sim.step();
    }

    let first = sim.reset();
    let second = sim.reset();

    for snapshot in [&first, &second] {
        assert_eq!(snapshot.time, 0.0);
        assert_eq!(snapshot.nodes.len(), 12);
        let ids: Vec<u64> = snapshot.nodes.iter().map(|n| n.id.as_u64()).collect();
        assert_eq!(ids, (0..12).collect::<Vec<u64>>());
    }
}

#[test]
fn test_parameter_update_applies_to_next_tick() {
    let params = ErgmParameters {
        node_count: 10,
        density: 0.5,
        temporal_decay: 0.0,
        perturbation_rate: 0.0,
        ..Default::default()
    };
    let mut sim = SimulationController::seeded(params.clone(), 8);
    let before = sim.step();

    // Full decay over a unit step prunes every edge
    sim.update_parameters(ErgmParameters {
        temporal_decay: 1.0,
        time_step: 1.0,
        ..params
    });
    assert_eq!(sim.network().edge_count(), before.edges.len());
    sim.step();
    assert_eq!(sim.network().edge_count(), 0);
}

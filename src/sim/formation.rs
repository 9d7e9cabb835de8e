//! Edge formation model
//!
//! Computes the probability that two people form a relationship and picks
//! its type. The probability is a deterministic function of the two nodes'
//! attributes and neighbor caches; the accept/reject draw belongs to the
//! caller.

use crate::config::ErgmParameters;
use crate::graph::{Edge, Node, RelationKind};
use rand::Rng;

/// Weight of skill overlap in the probability
const SKILL_SIMILARITY_WEIGHT: f64 = 0.3;

/// Mutual neighbors are scaled down by this before applying `clustering`
const MUTUAL_NEIGHBOR_SCALE: f64 = 10.0;

/// Probability of a formal tie inside one department (else collaborative)
const SAME_DEPARTMENT_FORMAL: f64 = 0.4;

/// Probability of a formal tie across departments (else informal)
const CROSS_DEPARTMENT_FORMAL: f64 = 0.3;

/// Coefficients of the edge probability, clamped into [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFormationModel {
    density: f64,
    homophily: f64,
    preferential_attachment: f64,
    clustering: f64,
}

impl EdgeFormationModel {
    pub fn new(params: &ErgmParameters) -> Self {
        let params = params.sanitized();
        Self {
            density: params.density,
            homophily: params.homophily,
            preferential_attachment: params.preferential_attachment,
            clustering: params.clustering,
        }
    }

    /// Probability in [0, 1] that `source` and `target` are linked.
    ///
    /// `node_count` is the current population size |V|.
    pub fn probability(&self, source: &Node, target: &Node, node_count: usize) -> f64 {
        let mut probability = self.density;

        if source.shares_department(target) {
            probability *= 1.0 + self.homophily;
        }

        if node_count > 0 {
            let degree_effect =
                (source.degree() + target.degree()) as f64 / (2 * node_count) as f64;
            probability *= 1.0 + self.preferential_attachment * degree_effect;
        }

        let mutual = source.mutual_connections(target) as f64;
        probability *= 1.0 + self.clustering * mutual / MUTUAL_NEIGHBOR_SCALE;

        let similarity = source.attributes.skill_similarity(&target.attributes);
        probability *= 1.0 + SKILL_SIMILARITY_WEIGHT * similarity;

        probability.clamp(0.0, 1.0)
    }

    /// Bernoulli draw against [`Self::probability`]
    pub fn accept<R: Rng + ?Sized>(
        &self,
        source: &Node,
        target: &Node,
        node_count: usize,
        rng: &mut R,
    ) -> bool {
        rng.gen_bool(self.probability(source, target, node_count))
    }

    /// Relationship type for a new tie between `source` and `target`
    pub fn select_kind<R: Rng + ?Sized>(
        &self,
        source: &Node,
        target: &Node,
        rng: &mut R,
    ) -> RelationKind {
        if source.shares_department(target) {
            if rng.gen_bool(SAME_DEPARTMENT_FORMAL) {
                RelationKind::Formal
            } else {
                RelationKind::Collaborative
            }
        } else if rng.gen_bool(CROSS_DEPARTMENT_FORMAL) {
            RelationKind::Formal
        } else {
            RelationKind::Informal
        }
    }

    /// Build a fresh edge: weight in [0.5, 1), strength in [0.3, 1), age 0
    pub fn form_edge<R: Rng + ?Sized>(&self, source: &Node, target: &Node, rng: &mut R) -> Edge {
        let kind = self.select_kind(source, target, rng);
        let weight = 0.5 + rng.gen::<f64>() * 0.5;
        let strength = 0.3 + rng.gen::<f64>() * 0.7;
        Edge::new(source.id, target.id, kind, weight, strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Attributes, Department, Network, NodeId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn person(id: u64, department: Department, skills: &[&str]) -> Node {
        Node::new(
            NodeId::new(id),
            Attributes {
                department,
                seniority: 2.0,
                skills: skills.iter().map(|s| s.to_string()).collect(),
                performance: 0.8,
            },
            [0.0; 3],
        )
    }

    fn model(density: f64, homophily: f64, pa: f64, clustering: f64) -> EdgeFormationModel {
        EdgeFormationModel::new(&ErgmParameters {
            density,
            homophily,
            preferential_attachment: pa,
            clustering,
            ..Default::default()
        })
    }

    #[test]
    fn test_base_probability_is_density() {
        let m = model(0.2, 0.9, 0.9, 0.9);
        let a = person(0, Department::Sales, &["CRM"]);
        let b = person(1, Department::Finance, &["Accounting"]);
        assert!((m.probability(&a, &b, 10) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_homophily_and_skills_multiply() {
        let m = model(0.2, 0.5, 0.0, 0.0);
        let a = person(0, Department::Sales, &["Negotiation", "CRM"]);
        let b = person(1, Department::Sales, &["Negotiation"]);
        // 0.2 * 1.5 * (1 + 0.3 * 0.5)
        let expected = 0.2 * 1.5 * 1.15;
        assert!((m.probability(&a, &b, 10) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_degree_and_mutual_effects() {
        let mut network = Network::new();
        network.add_node(person(0, Department::Sales, &[])).unwrap();
        network.add_node(person(1, Department::Finance, &[])).unwrap();
        network.add_node(person(2, Department::Hr, &[])).unwrap();
        network.add_node(person(3, Department::Marketing, &[])).unwrap();
        for (a, b) in [(0, 2), (1, 2), (0, 3), (1, 3)] {
            network
                .insert_edge(Edge::new(NodeId::new(a), NodeId::new(b), RelationKind::Informal, 0.5, 0.5))
                .unwrap();
        }
        network.rebuild_connections();

        let m = model(0.1, 0.0, 0.8, 0.5);
        let a = network.node(NodeId::new(0)).unwrap();
        let b = network.node(NodeId::new(1)).unwrap();
        // deg 2 + 2 over 2*4 nodes; two mutual neighbors
        let expected = 0.1 * (1.0 + 0.8 * 0.5) * (1.0 + 0.5 * 2.0 / 10.0);
        assert!((m.probability(a, b, 4) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_probability_clamped_to_one() {
        let m = model(1.0, 1.0, 1.0, 1.0);
        let a = person(0, Department::Hr, &["Training"]);
        let b = person(1, Department::Hr, &["Training"]);
        assert_eq!(m.probability(&a, &b, 2), 1.0);
    }

    #[test]
    fn test_out_of_range_density_is_clamped() {
        let m = model(5.0, 0.0, 0.0, 0.0);
        let a = person(0, Department::Hr, &[]);
        let b = person(1, Department::Sales, &[]);
        assert_eq!(m.probability(&a, &b, 2), 1.0);

        let zero = model(-1.0, 1.0, 1.0, 1.0);
        assert_eq!(zero.probability(&a, &b, 2), 0.0);
    }

    #[test]
    fn test_zero_nodes_guarded() {
        let m = model(0.5, 0.0, 1.0, 0.0);
        let a = person(0, Department::Hr, &[]);
        let b = person(1, Department::Sales, &[]);
        assert_eq!(m.probability(&a, &b, 0), 0.5);
    }

    #[test]
    fn test_kind_proportions() {
        let m = model(0.5, 0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(11);
        let a = person(0, Department::Engineering, &[]);
        let same = person(1, Department::Engineering, &[]);
        let other = person(2, Department::Finance, &[]);

        let trials = 10_000;
        let mut formal_same = 0;
        let mut formal_cross = 0;
        for _ in 0..trials {
            match m.select_kind(&a, &same, &mut rng) {
                RelationKind::Formal => formal_same += 1,
                RelationKind::Collaborative => {}
                RelationKind::Informal => panic!("informal tie inside a department"),
            }
            match m.select_kind(&a, &other, &mut rng) {
                RelationKind::Formal => formal_cross += 1,
                RelationKind::Informal => {}
                RelationKind::Collaborative => panic!("collaborative tie across departments"),
            }
        }
        let same_ratio = formal_same as f64 / trials as f64;
        let cross_ratio = formal_cross as f64 / trials as f64;
        assert!((same_ratio - 0.4).abs() < 0.03, "same-dept formal ratio {}", same_ratio);
        assert!((cross_ratio - 0.3).abs() < 0.03, "cross-dept formal ratio {}", cross_ratio);
    }

    #[test]
    fn test_form_edge_ranges() {
        let m = model(0.5, 0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let a = person(0, Department::Engineering, &[]);
        let b = person(1, Department::Sales, &[]);
        for _ in 0..100 {
            let edge = m.form_edge(&a, &b, &mut rng);
            assert_eq!(edge.key(), crate::graph::EdgeKey::new(a.id, b.id));
            assert!((0.5..1.0).contains(&edge.weight));
            assert!((0.3..1.0).contains(&edge.strength));
            assert_eq!(edge.age, 0.0);
        }
    }
}

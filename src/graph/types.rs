//! Core type definitions for the organizational network

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a person node.
///
/// Allocated monotonically by the node factory and never reused within a
/// simulation's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Department a person belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    Hr,
    Finance,
}

impl Department {
    /// Fixed department catalog
    pub const ALL: [Department; 5] = [
        Department::Engineering,
        Department::Marketing,
        Department::Sales,
        Department::Hr,
        Department::Finance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Hr => "HR",
            Department::Finance => "Finance",
        }
    }

    /// Render color keyed to the department
    pub fn color(&self) -> &'static str {
        match self {
            Department::Engineering => "#00f3ff",
            Department::Marketing => "#bf00ff",
            Department::Sales => "#39ff14",
            Department::Hr => "#ff6b35",
            Department::Finance => "#ffd700",
        }
    }

    /// Skill catalog, ordered from core to specialist
    pub fn skills(&self) -> &'static [&'static str] {
        match self {
            Department::Engineering => &["Programming", "Architecture", "DevOps"],
            Department::Marketing => &["Analytics", "Content", "SEO"],
            Department::Sales => &["Negotiation", "CRM", "Presentations"],
            Department::Hr => &["Recruiting", "Training", "Compliance"],
            Department::Finance => &["Accounting", "Analysis", "Reporting"],
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Relationship type carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Formal,
    Informal,
    Collaborative,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Formal,
        RelationKind::Informal,
        RelationKind::Collaborative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Formal => "formal",
            RelationKind::Informal => "informal",
            RelationKind::Collaborative => "collaborative",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "N42");

        let id2: NodeId = 100.into();
        assert_eq!(id2.as_u64(), 100);
    }

    #[test]
    fn test_id_ordering() {
        assert!(NodeId::new(1) < NodeId::new(2));
    }

    #[test]
    fn test_department_catalog() {
        for dept in Department::ALL {
            assert_eq!(dept.skills().len(), 3);
            assert!(dept.color().starts_with('#'));
        }
        assert_eq!(Department::Hr.to_string(), "HR");
    }

    #[test]
    fn test_relation_kind_serde() {
        let json = serde_json::to_string(&RelationKind::Collaborative).unwrap();
        assert_eq!(json, "\"collaborative\"");
        let back: RelationKind = serde_json::from_str("\"informal\"").unwrap();
        assert_eq!(back, RelationKind::Informal);
    }
}

//! Simulation parameters and layout constants
//!
//! Parameters can be built in code, or loaded from YAML/JSON files. Field
//! names accept both snake_case and the camelCase spelling used by UI
//! collaborators (`nodeCount`, `preferentialAttachment`, ...).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameters of the generative network process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErgmParameters {
    /// Population size; in growth mode, the growth target
    #[serde(alias = "nodeCount", alias = "nodes")]
    pub node_count: usize,

    /// Base edge probability
    pub density: f64,

    /// Same-department boost
    pub homophily: f64,

    /// High-degree boost
    #[serde(alias = "preferentialAttachment")]
    pub preferential_attachment: f64,

    /// Mutual-neighbor boost
    pub clustering: f64,

    /// Per-unit-time strength decay of every edge
    #[serde(alias = "temporalDecay")]
    pub temporal_decay: f64,

    /// Start empty and add people over time
    #[serde(alias = "growthMode")]
    pub growth_mode: bool,

    /// Expected arrivals per unit time while below `node_count`
    #[serde(alias = "growthRate")]
    pub growth_rate: f64,

    /// Simulation time advanced per tick
    #[serde(alias = "timeStep")]
    pub time_step: f64,

    /// Per-tick probability of a random add/remove perturbation
    #[serde(alias = "perturbationRate")]
    pub perturbation_rate: f64,
}

impl Default for ErgmParameters {
    fn default() -> Self {
        Self {
            node_count: 50,
            density: 0.3,
            homophily: 0.7,
            preferential_attachment: 0.5,
            clustering: 0.4,
            temporal_decay: 0.01,
            growth_mode: false,
            growth_rate: 0.5,
            time_step: 0.1,
            perturbation_rate: 0.02,
        }
    }
}

fn unit_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

fn check_unit(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{} is outside [0, 1]", value),
        })
    }
}

impl ErgmParameters {
    /// Copy with every field forced into its valid range.
    ///
    /// Probability-like fields are clamped into [0, 1]; non-finite values
    /// fall back to the defaults; `node_count` is at least 1.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let time_step = if self.time_step.is_finite() && self.time_step > 0.0 {
            self.time_step
        } else {
            defaults.time_step
        };

        Self {
            node_count: self.node_count.max(1),
            density: unit_or(self.density, defaults.density),
            homophily: unit_or(self.homophily, defaults.homophily),
            preferential_attachment: unit_or(
                self.preferential_attachment,
                defaults.preferential_attachment,
            ),
            clustering: unit_or(self.clustering, defaults.clustering),
            temporal_decay: unit_or(self.temporal_decay, defaults.temporal_decay),
            growth_mode: self.growth_mode,
            growth_rate: unit_or(self.growth_rate, defaults.growth_rate),
            time_step,
            perturbation_rate: unit_or(self.perturbation_rate, defaults.perturbation_rate),
        }
    }

    /// Strict range check, for parameters coming from outside the process
    pub fn validate(&self) -> ConfigResult<()> {
        if self.node_count == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "node_count",
                reason: "must be greater than 0".to_string(),
            });
        }
        check_unit("density", self.density)?;
        check_unit("homophily", self.homophily)?;
        check_unit("preferential_attachment", self.preferential_attachment)?;
        check_unit("clustering", self.clustering)?;
        check_unit("temporal_decay", self.temporal_decay)?;
        check_unit("growth_rate", self.growth_rate)?;
        check_unit("perturbation_rate", self.perturbation_rate)?;
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "time_step",
                reason: format!("{} is not a positive number", self.time_step),
            });
        }
        Ok(())
    }

    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        let params: Self = serde_yaml::from_str(input)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        let params: Self = serde_json::from_str(input)?;
        params.validate()?;
        Ok(params)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Force constants of the spatial layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub repulsion_strength: f64,
    /// Nodes farther apart than this do not repel
    pub repulsion_cutoff: f64,
    pub attraction_strength: f64,
    /// Linked nodes closer than this do not attract
    pub attraction_min_distance: f64,
    pub centering_strength: f64,
    pub damping: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            repulsion_strength: 0.5,
            repulsion_cutoff: 8.0,
            attraction_strength: 0.1,
            attraction_min_distance: 2.0,
            centering_strength: 0.02,
            damping: 0.95,
        }
    }
}

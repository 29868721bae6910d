use crate::common::{DomainError, DomainResult};
use crate::domains::agent::SimulationConfig;
use crate::domains::path_planning::{Heuristic, PlanningAlgorithm};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub search: SearchConfig,
    pub dynamics: DynamicsConfig,
    pub animation: AnimationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Percentage of cells turned into walls by random map generation.
    pub wall_density: f64,
    /// Seed for map generation and obstacle spawning. Unset means entropy.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 18,
            cols: 22,
            wall_density: 28.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: PlanningAlgorithm,
    pub heuristic: Heuristic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    pub enabled: bool,
    /// Percentage chance per traversal tick that a new obstacle appears.
    pub spawn_probability: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            spawn_probability: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub step_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { step_delay_ms: 25 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Status log file. Unset logs through tracing only.
    pub file: Option<String>,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(DomainError::invalid_configuration(format!(
                "Grid dimensions must be at least 1x1, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }
        for (name, value) in [
            ("wall_density", self.grid.wall_density),
            ("spawn_probability", self.dynamics.spawn_probability),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(DomainError::invalid_configuration(format!(
                    "{} must be a percentage within [0, 100], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn wall_density_fraction(&self) -> f64 {
        self.grid.wall_density / 100.0
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            algorithm: self.search.algorithm,
            heuristic: self.search.heuristic,
            dynamic_obstacles_enabled: self.dynamics.enabled,
            spawn_probability: self.dynamics.spawn_probability / 100.0,
            step_delay: Duration::from_millis(self.animation.step_delay_ms),
        }
    }
}

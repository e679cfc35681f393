//! Experiment configuration
use crate::agents::{Agent, AgentName, RandomAgent, TabularQLearningAgentConfig};
use crate::envs::{TrafficWorld, TrafficWorldConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error validating or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trial count must be at least 1")]
    ZeroTrials,
    #[error("{name} must be in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("a {width}x{height} grid has no start and destination at distance {min_distance}")]
    GridTooSmall {
        width: u32,
        height: u32,
        min_distance: u32,
    },
    #[error("error reading {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error parsing configuration")]
    Parse(#[from] serde_json::Error),
}

/// Check that a rate parameter lies in `[0, 1]`.
pub fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

/// Configuration of a full training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of trials to run.
    pub trial_count: u64,
    /// Random seed for the experiment.
    pub seed: u64,
    /// Which driver controls the primary cab.
    pub agent: AgentName,
    pub learner: TabularQLearningAgentConfig,
    pub world: TrafficWorldConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trial_count: 100,
            seed: 0,
            agent: AgentName::default(),
            learner: TabularQLearningAgentConfig::default(),
            world: TrafficWorldConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trial_count == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        self.learner.validate()?;
        self.world.validate()
    }

    /// Build the environment, seeded with `seed`.
    pub fn build_env(&self) -> Result<TrafficWorld, ConfigError> {
        self.world.build_env(self.seed)
    }

    /// Build the configured agent, seeded with `seed + 1`.
    pub fn build_agent(&self) -> Result<Box<dyn Agent>, ConfigError> {
        let seed = self.seed.wrapping_add(1);
        Ok(match self.agent {
            AgentName::Learning => Box::new(self.learner.build_agent(seed)?),
            AgentName::Random => Box::new(RandomAgent::new(seed)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::LearnFrom;

    #[test]
    fn default_is_valid() {
        let config = ExperimentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trial_count, 100);
        assert!((config.learner.exploration_rate - 0.1).abs() < 1e-12);
        assert!((config.learner.learning_rate - 0.1).abs() < 1e-12);
        assert!((config.learner.discount_factor - 0.9).abs() < 1e-12);
        assert!(config.world.enforce_deadline);
    }

    #[test]
    fn zero_trials_rejected() {
        let config = ExperimentConfig {
            trial_count: 0,
            ..ExperimentConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTrials)));
    }

    #[test]
    fn rate_out_of_range_rejected() {
        let mut config = ExperimentConfig::default();
        config.learner.exploration_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "exploration_rate",
                ..
            })
        ));
    }

    #[test]
    fn parse_partial_json() {
        let config: ExperimentConfig = serde_json::from_str(
            r#"{
                "trial_count": 20,
                "learner": {"learning_rate": 0.5, "learn_from": "post_action"},
                "world": {"enforce_deadline": false}
            }"#,
        )
        .unwrap();
        assert_eq!(config.trial_count, 20);
        assert!((config.learner.learning_rate - 0.5).abs() < 1e-12);
        assert!((config.learner.discount_factor - 0.9).abs() < 1e-12);
        assert_eq!(config.learner.learn_from, LearnFrom::PostAction);
        assert!(!config.world.enforce_deadline);
        assert_eq!(config.world.num_dummies, 3);
    }

    #[test]
    fn empty_grid_rejected() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"world": {"grid_width": 0}}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { width: 0, .. })
        ));
        assert!(config.build_env().is_err());
    }

    #[test]
    fn build_agents() {
        let mut config = ExperimentConfig::default();
        assert!(config
            .build_agent()
            .unwrap()
            .to_string()
            .starts_with("TabularQLearningAgent"));
        config.agent = AgentName::Random;
        assert_eq!(config.build_agent().unwrap().to_string(), "RandomAgent");
        assert!(config.build_env().is_ok());
    }

    #[test]
    fn missing_file() {
        let result = ExperimentConfig::from_json_file("/nonexistent/smartcab.json");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

//! Command-line options
use crate::agents::{AgentName, LearnFrom};
use crate::config::{ConfigError, ExperimentConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Train a smartcab to drive a grid of traffic lights.
///
/// Options given on the command line override those in the configuration file.
#[derive(Parser, Debug, Clone, PartialEq)]
#[clap(author, version, about)]
pub struct Options {
    #[clap(long, parse(from_os_str))]
    /// JSON experiment configuration file
    pub config: Option<PathBuf>,

    #[clap(long)]
    /// Number of trials to run
    pub trials: Option<u64>,

    #[clap(long)]
    /// Probability of taking a random action
    pub epsilon: Option<f64>,

    #[clap(long)]
    /// Learning rate
    pub alpha: Option<f64>,

    #[clap(long)]
    /// Discount factor
    pub gamma: Option<f64>,

    #[clap(long)]
    /// Let trials run past the deadline, up to the hard time limit
    pub no_deadline: bool,

    #[clap(long, arg_enum)]
    /// State that each Q-value update is keyed on
    pub learn_from: Option<LearnFrom>,

    #[clap(long, arg_enum)]
    /// Driver of the primary cab
    pub agent: Option<AgentName>,

    #[clap(long)]
    /// Random seed for the experiment
    pub seed: Option<u64>,

    #[clap(long, default_value = "1000")]
    /// Minimum time between progress summaries, in milliseconds
    pub display_period_ms: u64,
}

impl Options {
    /// Build the experiment configuration.
    ///
    /// Starts from the configuration file if given, otherwise from defaults,
    /// then applies command-line overrides and validates the result.
    pub fn experiment_config(&self) -> Result<ExperimentConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_json_file(path)?,
            None => ExperimentConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trial_count = trials;
        }
        if let Some(epsilon) = self.epsilon {
            config.learner.exploration_rate = epsilon;
        }
        if let Some(alpha) = self.alpha {
            config.learner.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.learner.discount_factor = gamma;
        }
        if self.no_deadline {
            config.world.enforce_deadline = false;
        }
        if let Some(learn_from) = self.learn_from {
            config.learner.learn_from = learn_from;
        }
        if let Some(agent) = self.agent {
            config.agent = agent;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }

    pub const fn display_period(&self) -> Duration {
        Duration::from_millis(self.display_period_ms)
    }
}

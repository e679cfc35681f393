//! Driving agents
mod learner;
mod policy;
mod q_table;
mod random;
mod tabular;

pub use learner::QLearner;
pub use policy::EpsilonGreedy;
pub use q_table::QTable;
pub use random::RandomAgent;
pub use tabular::{TabularQLearningAgent, TabularQLearningAgentConfig};

use crate::envs::{Environment, Intersection};
use crate::logging::Logger;
use crate::simulation::Step;
use clap::ArgEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A driver for the primary cab.
pub trait Agent: fmt::Display {
    /// Prepare for a new trial heading to `destination`.
    fn reset(&mut self, destination: Intersection);

    /// Run one sense-act-learn cycle in the environment.
    ///
    /// Called once per tick, after the environment has advanced and before it ends the tick.
    ///
    /// # Returns
    /// A description of the tick. `trial_done` reflects the environment status right after acting.
    fn update(&mut self, env: &mut dyn Environment, logger: &mut dyn Logger) -> Step;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn reset(&mut self, destination: Intersection) {
        A::reset(self, destination)
    }

    fn update(&mut self, env: &mut dyn Environment, logger: &mut dyn Logger) -> Step {
        A::update(self, env, logger)
    }
}

/// Agent kinds that can drive the primary cab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ArgEnum)]
#[serde(rename_all = "snake_case")]
pub enum AgentName {
    /// Epsilon-greedy tabular Q-learning.
    Learning,
    /// Uniformly random actions.
    Random,
}

impl Default for AgentName {
    fn default() -> Self {
        Self::Learning
    }
}

/// Which state a Q-learning update is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ArgEnum)]
#[serde(rename_all = "snake_case")]
pub enum LearnFrom {
    /// The state in which the action was selected.
    PreAction,
    /// The state sensed again after acting.
    PostAction,
}

impl Default for LearnFrom {
    fn default() -> Self {
        Self::PreAction
    }
}

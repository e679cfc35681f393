//! Tabular Q-learning agent
use super::{Agent, EpsilonGreedy, LearnFrom, QLearner, QTable};
use crate::config::{check_rate, ConfigError};
use crate::envs::{CabId, Environment, Intersection, RoutePlanner};
use crate::logging::{Event, Logger, LoggerHelper};
use crate::simulation::Step;
use crate::spaces::{Inputs, State};
use crate::Prng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration of an epsilon-greedy tabular Q-learning agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabularQLearningAgentConfig {
    /// Probability of taking a random action.
    pub exploration_rate: f64,
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub learn_from: LearnFrom,
}

impl TabularQLearningAgentConfig {
    pub const fn new(exploration_rate: f64, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            exploration_rate,
            learning_rate,
            discount_factor,
            learn_from: LearnFrom::PreAction,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("exploration_rate", self.exploration_rate)?;
        check_rate("learning_rate", self.learning_rate)?;
        check_rate("discount_factor", self.discount_factor)
    }

    /// Build an agent with a zero-initialized table.
    pub fn build_agent(&self, seed: u64) -> Result<TabularQLearningAgent, ConfigError> {
        self.validate()?;
        Ok(TabularQLearningAgent {
            q_table: QTable::new(),
            policy: EpsilonGreedy::new(self.exploration_rate),
            learner: QLearner::new(self.learning_rate, self.discount_factor),
            learn_from: self.learn_from,
            planner: RoutePlanner::new(),
            rng: Prng::seed_from_u64(seed),
        })
    }
}

impl Default for TabularQLearningAgentConfig {
    fn default() -> Self {
        Self::new(0.1, 0.1, 0.9)
    }
}

/// An epsilon-greedy tabular Q-learning driver.
///
/// Observes the light, the planner's next waypoint and the intentions of oncoming
/// and left traffic. The table persists across trials.
#[derive(Debug, Clone)]
pub struct TabularQLearningAgent {
    pub q_table: QTable,
    pub policy: EpsilonGreedy,
    pub learner: QLearner,
    pub learn_from: LearnFrom,
    planner: RoutePlanner,
    rng: Prng,
}

impl TabularQLearningAgent {
    /// Encode the primary cab's current view of the world.
    fn observe(&self, env: &dyn Environment) -> (Inputs, State) {
        let waypoint = self.planner.next_waypoint(env.pose(CabId::PRIMARY));
        let inputs = env.sense(CabId::PRIMARY);
        (inputs, State::encode(&inputs, waypoint))
    }
}

impl fmt::Display for TabularQLearningAgent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TabularQLearningAgent(epsilon={}, alpha={}, gamma={}, {:?})",
            self.policy.exploration_rate,
            self.learner.learning_rate,
            self.learner.discount_factor,
            self.learn_from
        )
    }
}

impl Agent for TabularQLearningAgent {
    fn reset(&mut self, destination: Intersection) {
        self.planner.route_to(destination);
    }

    fn update(&mut self, env: &mut dyn Environment, logger: &mut dyn Logger) -> Step {
        let deadline = env.deadline();
        let (inputs, state) = self.observe(env);
        let action = self.policy.select(state, &self.q_table, &mut self.rng);
        let reward = env.act(CabId::PRIMARY, action);

        let (_, next_state) = self.observe(env);
        let learn_state = match self.learn_from {
            LearnFrom::PreAction => state,
            LearnFrom::PostAction => next_state,
        };
        let q_value = self
            .learner
            .update(&mut self.q_table, learn_state, action, reward, next_state);
        logger.unwrap_log(Event::Tick, "q_value", q_value);

        Step {
            inputs,
            state,
            action,
            reward,
            next_state,
            deadline,
            trial_done: env.is_done(),
        }
    }
}

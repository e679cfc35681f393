//! One-step Q-learning
use super::q_table::QTable;
use crate::spaces::{Action, State};

/// Temporal-difference update rule with a fixed learning rate and discount factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearner {
    /// Weight of the new target relative to the old estimate.
    pub learning_rate: f64,
    /// Weight of estimated future reward relative to immediate reward.
    pub discount_factor: f64,
}

impl QLearner {
    pub const fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
        }
    }

    /// Update the value of `(state, action)` toward `reward + discount * max(next_state)`.
    ///
    /// # Returns
    /// The new value, which is also written into the table.
    pub fn update(
        &self,
        q_table: &mut QTable,
        state: State,
        action: Action,
        reward: f64,
        next_state: State,
    ) -> f64 {
        let target = reward + self.discount_factor * q_table.max_value(next_state);
        let value = &mut q_table[state][action];
        *value = (1.0 - self.learning_rate) * *value + self.learning_rate * target;
        *value
    }
}

impl Default for QLearner {
    fn default() -> Self {
        Self::new(0.1, 0.9)
    }
}

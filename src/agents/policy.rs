//! Action selection
use super::q_table::QTable;
use crate::spaces::{sample_indexed, Action, State};
use rand::Rng;

/// Epsilon-greedy action selection.
///
/// Exploits the best known action with probability `1 - exploration_rate`
/// and otherwise picks any action uniformly at random.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    /// Probability of taking a random action.
    pub exploration_rate: f64,
}

impl EpsilonGreedy {
    pub const fn new(exploration_rate: f64) -> Self {
        Self { exploration_rate }
    }

    /// Select an action for `state`.
    ///
    /// Draws exactly one uniform sample to decide between exploiting and exploring,
    /// and one more when exploring.
    pub fn select<R: Rng + ?Sized>(&self, state: State, q_table: &QTable, rng: &mut R) -> Action {
        if rng.gen::<f64>() < 1.0 - self.exploration_rate {
            q_table.best_action(state)
        } else {
            sample_indexed(rng)
        }
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(0.1)
    }
}

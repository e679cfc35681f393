//! State-action value table
use crate::spaces::{iter_indexed, Action, Indexed, State};
use enum_map::EnumMap;
use std::ops::{Index, IndexMut};

/// Action values for every state.
///
/// All entries exist from construction onward; none are inserted or removed later.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<EnumMap<Action, f64>>,
}

impl QTable {
    /// Create a table with every value set to zero.
    pub fn new() -> Self {
        Self {
            values: iter_indexed::<State>().map(|_| EnumMap::default()).collect(),
        }
    }

    /// Number of states in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, state: State, action: Action) -> f64 {
        self[state][action]
    }

    /// Largest action value in a state.
    pub fn max_value(&self, state: State) -> f64 {
        self[state]
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Action with the largest value in a state.
    ///
    /// Ties go to the earliest action in canonical order.
    pub fn best_action(&self, state: State) -> Action {
        let mut best_action = Action::Idle;
        let mut best_value = f64::NEG_INFINITY;
        for (action, &value) in &self[state] {
            if value > best_value {
                best_action = action;
                best_value = value;
            }
        }
        best_action
    }

    /// Iterate over all states and their action values.
    pub fn iter(&self) -> impl Iterator<Item = (State, &EnumMap<Action, f64>)> {
        iter_indexed::<State>().zip(&self.values)
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<State> for QTable {
    type Output = EnumMap<Action, f64>;

    fn index(&self, state: State) -> &Self::Output {
        &self.values[state.as_index()]
    }
}

impl IndexMut<State> for QTable {
    fn index_mut(&mut self, state: State) -> &mut Self::Output {
        &mut self.values[state.as_index()]
    }
}

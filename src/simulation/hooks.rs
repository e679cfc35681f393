//! Simulation hooks.
use super::Step;
use crate::logging::{Event, Loggable, Logger, LoggerHelper};
use crate::spaces::{Action, Indexed};
use enum_map::EnumMap;

/// A simulation hook.
///
/// A callback function called on each tick.
pub trait SimulationHook {
    /// Call the hook on the current step.
    ///
    /// # Args
    /// * `step` - The most recent tick of the primary cab.
    /// * `logger` - A logger.
    ///
    /// # Returns
    /// Whether the simulation should continue after this step.
    fn call<L: Logger + ?Sized>(&mut self, step: &Step, logger: &mut L) -> bool;
}

impl<T: SimulationHook + ?Sized> SimulationHook for &mut T {
    fn call<L: Logger + ?Sized>(&mut self, step: &Step, logger: &mut L) -> bool {
        T::call(self, step, logger)
    }
}

/// A simulation hook defined from a closure.
#[derive(Debug, Clone, Copy)]
pub struct ClosureHook<F> {
    f: F,
}

impl<F> From<F> for ClosureHook<F> {
    fn from(f: F) -> Self {
        Self { f }
    }
}

impl<F> SimulationHook for ClosureHook<F>
where
    F: FnMut(&Step) -> bool,
{
    fn call<L: Logger + ?Sized>(&mut self, step: &Step, _: &mut L) -> bool {
        (self.f)(step)
    }
}

/// A hook that logs tick and trial statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StepLogger {
    /// Length of the current trial
    trial_length: u64,
    trial_reward: f64,
}

impl StepLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimulationHook for StepLogger {
    fn call<L: Logger + ?Sized>(&mut self, step: &Step, logger: &mut L) -> bool {
        logger.unwrap_log(Event::Tick, "reward", step.reward);
        logger.unwrap_log(Event::Tick, "deadline", step.deadline as f64);
        logger.unwrap_log(
            Event::Tick,
            "action",
            Loggable::IndexSample {
                value: step.action.as_index(),
                size: Action::SIZE,
            },
        );
        logger.unwrap_log(
            Event::Tick,
            "waypoint",
            Loggable::IndexSample {
                value: step.state.waypoint.as_index(),
                size: Action::SIZE,
            },
        );

        self.trial_length += 1;
        self.trial_reward += step.reward;
        if step.trial_done {
            logger.unwrap_log(Event::Trial, "length", self.trial_length as f64);
            self.trial_length = 0;
            logger.unwrap_log(Event::Trial, "reward", self.trial_reward);
            self.trial_reward = 0.0;
        }
        true
    }
}

/// Count how often each action is taken.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActionCounter {
    pub counts: EnumMap<Action, u64>,
}

impl ActionCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimulationHook for ActionCounter {
    fn call<L: Logger + ?Sized>(&mut self, step: &Step, _: &mut L) -> bool {
        self.counts[step.action] += 1;
        true
    }
}

/// Collect reward statistics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RewardStatistics {
    /// Total reward for completed trials
    total_trial_reward: f64,
    /// Reward for the current incomplete trial
    partial_reward: f64,
    /// Number of completed ticks
    num_steps: u64,
    /// Number of completed trials
    num_trials: u64,
}

impl RewardStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean reward per tick.
    pub fn mean_step_reward(&self) -> f64 {
        (self.total_trial_reward + self.partial_reward) / (self.num_steps as f64)
    }

    /// Mean reward per trial.
    pub fn mean_trial_reward(&self) -> f64 {
        self.total_trial_reward / (self.num_trials as f64)
    }
}

impl SimulationHook for RewardStatistics {
    fn call<L: Logger + ?Sized>(&mut self, step: &Step, _: &mut L) -> bool {
        self.partial_reward += step.reward;
        self.num_steps += 1;
        if step.trial_done {
            self.total_trial_reward += self.partial_reward;
            self.partial_reward = 0.0;
            self.num_trials += 1;
        }
        true
    }
}

impl SimulationHook for () {
    fn call<L: Logger + ?Sized>(&mut self, _: &Step, _: &mut L) -> bool {
        true
    }
}

// For a tuple of hooks, continue if all allow continuing.
// Every hook is called even if an earlier one asks to stop.
macro_rules! impl_hook_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: SimulationHook),+> SimulationHook for ($($name,)+) {
            #[allow(non_snake_case)]
            fn call<L: Logger + ?Sized>(&mut self, step: &Step, logger: &mut L) -> bool {
                let ($($name,)+) = self;
                let mut keep_going = true;
                $( keep_going &= $name.call(step, logger); )+
                keep_going
            }
        }
    };
}

impl_hook_for_tuple!(A);
impl_hook_for_tuple!(A, B);
impl_hook_for_tuple!(A, B, C);
impl_hook_for_tuple!(A, B, C, D);

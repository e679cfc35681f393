//! Running agents in environments
pub mod hooks;

pub use hooks::{ActionCounter, ClosureHook, RewardStatistics, SimulationHook, StepLogger};

use crate::agents::Agent;
use crate::envs::{Environment, TrialOutcome, TrialStatus};
use crate::logging::{Event, Logger, LoggerHelper};
use crate::spaces::{Action, Inputs, State};
use thiserror::Error;

/// Description of one tick of the primary cab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Sensor readings before acting.
    pub inputs: Inputs,
    /// State in which the action was selected.
    pub state: State,
    pub action: Action,
    pub reward: f64,
    /// State sensed again after acting.
    pub next_state: State,
    /// Deadline at the start of the tick.
    pub deadline: i64,
    /// Whether this tick ends the trial.
    pub trial_done: bool,
}

/// Error summarizing a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    /// The run ended before any trial finished.
    #[error("no trials were completed")]
    NoCompletedTrials,
}

/// Results of a run of trials.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of completed trials.
    pub trial_count: u64,
    /// Number of trials that reached the destination.
    pub success_num: u64,
    /// Outcome of each completed trial in order.
    pub outcomes: Vec<TrialOutcome>,
    /// Ticks over all trials, including an unfinished final trial.
    pub total_ticks: u64,
}

impl RunSummary {
    /// Fraction of completed trials that reached the destination.
    pub fn success_rate(&self) -> Result<f64, RunError> {
        if self.trial_count == 0 {
            return Err(RunError::NoCompletedTrials);
        }
        Ok(self.success_num as f64 / self.trial_count as f64)
    }

    fn record(&mut self, outcome: TrialOutcome) {
        self.trial_count += 1;
        if outcome.is_success() {
            self.success_num += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// Run an agent for a number of trials.
///
/// Each trial resets the environment and routes the agent to the new destination,
/// then runs ticks until the environment reports the trial finished.
/// The table and any other agent state persist across trials.
///
/// # Args
/// * `env` - Environment to drive in.
/// * `agent` - Driver of the primary cab.
/// * `trial_count` - Number of trials to run.
/// * `hooks` - Called on every tick. The run stops early if a hook returns `false`.
/// * `logger` - Receives per-tick and per-trial statistics.
pub fn run_trials<E, A, H, L>(
    env: &mut E,
    agent: &mut A,
    trial_count: u64,
    hooks: &mut H,
    logger: &mut L,
) -> RunSummary
where
    E: Environment,
    A: Agent + ?Sized,
    H: SimulationHook + ?Sized,
    L: Logger,
{
    let mut summary = RunSummary::default();
    for _ in 0..trial_count {
        let destination = env.reset();
        agent.reset(destination);

        loop {
            env.advance();
            let mut step = agent.update(env, logger);
            env.end_tick();
            summary.total_ticks += 1;

            let status = env.status();
            step.trial_done = status.is_finished();
            let keep_going = hooks.call(&step, logger);
            logger.done(Event::Tick);

            if let TrialStatus::Finished(outcome) = status {
                summary.record(outcome);
                logger.unwrap_log(Event::Trial, "outcome", outcome.to_string());
                logger.unwrap_log(
                    Event::Trial,
                    "success_rate",
                    if outcome.is_success() { 1.0 } else { 0.0 },
                );
                logger.done(Event::Trial);
            }
            if !keep_going {
                return summary;
            }
            if status.is_finished() {
                break;
            }
        }
    }
    summary
}

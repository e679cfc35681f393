//! Driving environments
mod dummy;
mod grid;
mod lights;
mod planner;
#[cfg(test)]
pub mod testing;
mod traffic;

pub use dummy::DummyCab;
pub use grid::{Grid, Heading, Intersection, Pose};
pub use lights::{Phase, TrafficLight};
pub use planner::RoutePlanner;
pub use traffic::{TrafficWorld, TrafficWorldConfig};

use crate::spaces::{Action, Inputs};
use std::fmt;

/// Identifies a cab in an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CabId(pub usize);

impl CabId {
    /// The cab driven by the agent under study.
    pub const PRIMARY: Self = Self(0);

    pub const fn is_primary(self) -> bool {
        self.0 == Self::PRIMARY.0
    }
}

/// Why a trial ended without reaching the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The deadline ran out while deadlines were enforced.
    DeadlineExceeded,
    /// The deadline passed the hard limit that applies even when deadlines are not enforced.
    HardTimeLimit,
}

/// Final result of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrialOutcome {
    Succeeded,
    Failed(FailureReason),
}

impl TrialOutcome {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for TrialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed(FailureReason::DeadlineExceeded) => write!(f, "deadline exceeded"),
            Self::Failed(FailureReason::HardTimeLimit) => write!(f, "hard time limit"),
        }
    }
}

/// Progress of the current trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrialStatus {
    NotStarted,
    Running,
    Finished(TrialOutcome),
}

impl TrialStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

impl Default for TrialStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// A world of intersections and cabs that a driving agent interacts with.
///
/// A trial consists of [`Environment::reset`] followed by ticks until the status is finished.
/// Each tick is [`Environment::advance`], the primary cab's sense / act calls,
/// then [`Environment::end_tick`].
pub trait Environment {
    /// Actions accepted by [`Environment::act`] in canonical order.
    fn valid_actions(&self) -> [Action; 4] {
        Action::ALL
    }

    /// Sense the traffic around a cab.
    fn sense(&self, cab: CabId) -> Inputs;

    /// Apply an action for a cab.
    ///
    /// # Returns
    /// The reward for the action.
    fn act(&mut self, cab: CabId, action: Action) -> f64;

    /// Current location and heading of a cab.
    fn pose(&self, cab: CabId) -> Pose;

    /// Remaining ticks for the primary cab to reach its destination.
    ///
    /// Becomes negative once the deadline has passed.
    fn deadline(&self) -> i64;

    /// Status of the current trial.
    fn status(&self) -> TrialStatus;

    /// Whether the current trial has ended.
    fn is_done(&self) -> bool {
        self.status().is_finished()
    }

    /// Start a new trial.
    ///
    /// # Returns
    /// The destination of the primary cab.
    fn reset(&mut self) -> Intersection;

    /// Start a tick: update traffic lights and move background traffic.
    fn advance(&mut self);

    /// End a tick: check and count down the primary cab's deadline.
    fn end_tick(&mut self);
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn valid_actions(&self) -> [Action; 4] {
        E::valid_actions(self)
    }
    fn sense(&self, cab: CabId) -> Inputs {
        E::sense(self, cab)
    }
    fn act(&mut self, cab: CabId, action: Action) -> f64 {
        E::act(self, cab, action)
    }
    fn pose(&self, cab: CabId) -> Pose {
        E::pose(self, cab)
    }
    fn deadline(&self) -> i64 {
        E::deadline(self)
    }
    fn status(&self) -> TrialStatus {
        E::status(self)
    }
    fn reset(&mut self) -> Intersection {
        E::reset(self)
    }
    fn advance(&mut self) {
        E::advance(self)
    }
    fn end_tick(&mut self) {
        E::end_tick(self)
    }
}

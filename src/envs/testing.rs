//! Environment testing utilities
use super::{CabId, Environment, Grid, Heading, Intersection, Pose, TrialOutcome, TrialStatus};
use crate::spaces::{sample_indexed, Action, Inputs};
use crate::Prng;
use rand::SeedableRng;

/// Run random primary-cab actions for a number of trials and check that invariants hold.
pub fn run_random<E: Environment>(env: &mut E, grid: Grid, num_trials: u64, seed: u64) {
    let mut rng = Prng::seed_from_u64(seed);
    for _ in 0..num_trials {
        let destination = env.reset();
        assert_eq!(env.status(), TrialStatus::Running);
        let mut ticks = 0;
        while !env.is_done() {
            env.advance();
            let deadline = env.deadline();
            let action: Action = sample_indexed(&mut rng);
            let reward = env.act(CabId::PRIMARY, action);
            assert!((-1.0..=12.0).contains(&reward), "reward {}", reward);

            let location = env.pose(CabId::PRIMARY).location;
            assert!(grid.intersections().any(|l| l == location));
            if env.status() == TrialStatus::Finished(TrialOutcome::Succeeded) {
                assert_eq!(location, destination);
            }
            env.end_tick();
            if !env.is_done() {
                assert_eq!(env.deadline(), deadline - 1);
            }
            ticks += 1;
            assert!(ticks < 10_000, "trial did not terminate");
        }
    }
}

/// Environment that replays fixed sensor readings around a single action.
///
/// Readings switch from `before` to `after` once the primary cab acts
/// and switch back at the start of the next tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEnv {
    pub before: (Pose, Inputs),
    pub after: (Pose, Inputs),
    pub destination: Intersection,
    /// Reward returned by every action.
    pub reward: f64,
    pub deadline: i64,
    /// Outcome to report once the primary cab acts.
    pub outcome_on_act: Option<TrialOutcome>,
    /// Actions taken by the primary cab.
    pub actions: Vec<Action>,
    acted: bool,
    status: TrialStatus,
}

impl ScriptedEnv {
    pub fn new(before: (Pose, Inputs), after: (Pose, Inputs), reward: f64) -> Self {
        Self {
            before,
            after,
            destination: Intersection::new(8, 6),
            reward,
            deadline: 20,
            outcome_on_act: None,
            actions: Vec::new(),
            acted: false,
            status: TrialStatus::NotStarted,
        }
    }

    /// Readings that do not change when acting.
    pub fn constant(pose: Pose, inputs: Inputs, reward: f64) -> Self {
        Self::new((pose, inputs), (pose, inputs), reward)
    }

    /// Pose heading east at `(1, 1)`.
    pub const fn start_pose() -> Pose {
        Pose::new(Intersection::new(1, 1), Heading::EAST)
    }

    const fn current(&self) -> &(Pose, Inputs) {
        if self.acted {
            &self.after
        } else {
            &self.before
        }
    }
}

impl Environment for ScriptedEnv {
    fn sense(&self, _: CabId) -> Inputs {
        self.current().1
    }

    fn act(&mut self, _: CabId, action: Action) -> f64 {
        self.actions.push(action);
        self.acted = true;
        if let Some(outcome) = self.outcome_on_act {
            self.status = TrialStatus::Finished(outcome);
        }
        self.reward
    }

    fn pose(&self, _: CabId) -> Pose {
        self.current().0
    }

    fn deadline(&self) -> i64 {
        self.deadline
    }

    fn status(&self) -> TrialStatus {
        self.status
    }

    fn reset(&mut self) -> Intersection {
        self.acted = false;
        self.status = TrialStatus::Running;
        self.destination
    }

    fn advance(&mut self) {
        self.acted = false;
    }

    fn end_tick(&mut self) {
        self.deadline -= 1;
    }
}

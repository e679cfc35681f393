//! Grid world with traffic lights and background traffic.
use super::dummy::DummyCab;
use super::grid::{Grid, Heading, Intersection, Pose};
use super::lights::TrafficLight;
use super::planner::RoutePlanner;
use super::{CabId, Environment, FailureReason, TrialOutcome, TrialStatus};
use crate::config::ConfigError;
use crate::spaces::{Action, Inputs, Light};
use crate::Prng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Minimum distance between the start and the destination of a trip.
pub const MIN_TRIP_DISTANCE: u32 = 4;
/// Ticks allowed per block of distance between start and destination.
pub const DEADLINE_PER_BLOCK: u32 = 5;
/// A trial is aborted once the deadline reaches this value, even if deadlines are not enforced.
pub const HARD_TIME_LIMIT: i64 = -100;

/// Reward for a legal move along the planned route.
const REWARD_ON_ROUTE: f64 = 2.0;
/// Reward for a legal move away from the planned route.
const REWARD_OFF_ROUTE: f64 = -0.5;
/// Reward for an illegal move.
const REWARD_VIOLATION: f64 = -1.0;
/// Bonus for reaching the destination before the deadline.
const REWARD_ARRIVAL: f64 = 10.0;

/// Configuration of a [`TrafficWorld`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficWorldConfig {
    /// Number of intersections from west to east.
    pub grid_width: u32,
    /// Number of intersections from north to south.
    pub grid_height: u32,
    /// Number of rule-following background cabs.
    pub num_dummies: usize,
    /// End a trial when the deadline runs out.
    pub enforce_deadline: bool,
}

impl Default for TrafficWorldConfig {
    fn default() -> Self {
        let grid = Grid::default();
        Self {
            grid_width: grid.width,
            grid_height: grid.height,
            num_dummies: 3,
            enforce_deadline: true,
        }
    }
}

impl TrafficWorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = Grid::new(self.grid_width, self.grid_height);
        if grid.is_empty() || grid.diameter() < MIN_TRIP_DISTANCE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min_distance: MIN_TRIP_DISTANCE,
            });
        }
        Ok(())
    }

    /// Build an environment instance.
    ///
    /// # Args
    /// * `seed` - Seed for the light layout, trip sampling, and background traffic.
    pub fn build_env(&self, seed: u64) -> Result<TrafficWorld, ConfigError> {
        self.validate()?;
        Ok(TrafficWorld::new(
            Grid::new(self.grid_width, self.grid_height),
            self.num_dummies,
            self.enforce_deadline,
            Prng::seed_from_u64(seed),
        ))
    }
}

/// A grid of signalled intersections shared by the primary cab and dummy cabs.
#[derive(Debug, Clone)]
pub struct TrafficWorld {
    grid: Grid,
    /// One light per intersection, indexed by [`Grid::index`].
    lights: Vec<TrafficLight>,
    /// Poses of all cabs, indexed by [`CabId`].
    poses: Vec<Pose>,
    /// `dummies[i]` drives `CabId(i + 1)`.
    dummies: Vec<DummyCab>,
    /// Route of the primary cab.
    planner: RoutePlanner,
    deadline: i64,
    enforce_deadline: bool,
    t: u64,
    status: TrialStatus,
    rng: Prng,
}

impl TrafficWorld {
    fn new(grid: Grid, num_dummies: usize, enforce_deadline: bool, mut rng: Prng) -> Self {
        let lights = grid
            .intersections()
            .map(|_| TrafficLight::random(&mut rng))
            .collect();
        let poses = (0..=num_dummies)
            .map(|_| random_pose(grid, &mut rng))
            .collect();
        let dummies = (0..num_dummies).map(|_| DummyCab::new(&mut rng)).collect();
        Self {
            grid,
            lights,
            poses,
            dummies,
            planner: RoutePlanner::new(),
            deadline: 0,
            enforce_deadline,
            t: 0,
            status: TrialStatus::NotStarted,
            rng,
        }
    }

    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Ticks elapsed in the current trial.
    pub const fn time(&self) -> u64 {
        self.t
    }

    /// Destination of the primary cab in the current trial.
    pub const fn destination(&self) -> Option<Intersection> {
        self.planner.destination()
    }

    /// Number of cabs including the primary cab.
    pub fn num_cabs(&self) -> usize {
        self.poses.len()
    }

    pub fn light_at(&self, location: Intersection) -> &TrafficLight {
        &self.lights[self.grid.index(location)]
    }

    /// The move a cab currently intends to make.
    fn waypoint(&self, cab: CabId) -> Action {
        if cab.is_primary() {
            self.planner.next_waypoint(self.poses[cab.0])
        } else {
            self.dummies[cab.0 - 1].waypoint
        }
    }
}

impl Environment for TrafficWorld {
    fn sense(&self, cab: CabId) -> Inputs {
        let pose = self.poses[cab.0];
        let mut inputs = Inputs {
            light: self.light_at(pose.location).light_for(pose.heading),
            ..Inputs::default()
        };

        for (i, other) in self.poses.iter().enumerate() {
            if i == cab.0 || other.location != pose.location || other.heading == pose.heading {
                continue;
            }
            let intent = self.waypoint(CabId(i));
            if pose.heading.dot(other.heading) == -1 {
                if inputs.oncoming != Action::Left {
                    inputs.oncoming = intent;
                }
            } else if pose.heading.approaches_from_right(other.heading) {
                if !matches!(inputs.right, Action::Forward | Action::Left) {
                    inputs.right = intent;
                }
            } else if inputs.left != Action::Forward {
                inputs.left = intent;
            }
        }
        inputs
    }

    fn act(&mut self, cab: CabId, action: Action) -> f64 {
        let pose = self.poses[cab.0];
        let inputs = self.sense(cab);
        let waypoint = self.waypoint(cab);
        let green = inputs.light == Light::Green;

        let heading = match action {
            Action::Idle => Some(pose.heading),
            Action::Forward => green.then(|| pose.heading),
            Action::Left => (green && matches!(inputs.oncoming, Action::Idle | Action::Left))
                .then(|| pose.heading.turn_left()),
            Action::Right => {
                (green || inputs.left != Action::Forward).then(|| pose.heading.turn_right())
            }
        };

        let mut reward = match heading {
            None => REWARD_VIOLATION,
            Some(_) if action == Action::Idle => 0.0,
            Some(heading) => {
                let location = self.grid.advance(pose.location, heading);
                self.poses[cab.0] = Pose::new(location, heading);
                if action == waypoint {
                    REWARD_ON_ROUTE
                } else {
                    REWARD_OFF_ROUTE
                }
            }
        };

        if cab.is_primary()
            && self.status == TrialStatus::Running
            && Some(self.poses[cab.0].location) == self.planner.destination()
        {
            if self.deadline >= 0 {
                reward += REWARD_ARRIVAL;
            }
            self.status = TrialStatus::Finished(TrialOutcome::Succeeded);
        }
        reward
    }

    fn pose(&self, cab: CabId) -> Pose {
        self.poses[cab.0]
    }

    fn deadline(&self) -> i64 {
        self.deadline
    }

    fn status(&self) -> TrialStatus {
        self.status
    }

    fn reset(&mut self) -> Intersection {
        self.t = 0;
        for light in &mut self.lights {
            light.reset();
        }

        let (start, destination) = loop {
            let start = self.grid.sample(&mut self.rng);
            let destination = self.grid.sample(&mut self.rng);
            if Grid::distance(start, destination) >= MIN_TRIP_DISTANCE {
                break (start, destination);
            }
        };
        let heading = random_heading(&mut self.rng);
        self.poses[CabId::PRIMARY.0] = Pose::new(start, heading);
        for pose in self.poses.iter_mut().skip(1) {
            *pose = random_pose(self.grid, &mut self.rng);
        }

        self.deadline = i64::from(Grid::distance(start, destination) * DEADLINE_PER_BLOCK);
        self.planner.route_to(destination);
        self.status = TrialStatus::Running;
        destination
    }

    fn advance(&mut self) {
        for light in &mut self.lights {
            light.update(self.t);
        }
        for i in 0..self.dummies.len() {
            let cab = CabId(i + 1);
            let inputs = self.sense(cab);
            let action = self.dummies[i].decide(&inputs, &mut self.rng);
            self.act(cab, action);
        }
    }

    fn end_tick(&mut self) {
        if self.status != TrialStatus::Running {
            return;
        }
        if self.deadline <= HARD_TIME_LIMIT {
            self.status = TrialStatus::Finished(TrialOutcome::Failed(FailureReason::HardTimeLimit));
        } else if self.enforce_deadline && self.deadline <= 0 {
            self.status =
                TrialStatus::Finished(TrialOutcome::Failed(FailureReason::DeadlineExceeded));
        }
        self.deadline -= 1;
        self.t += 1;
    }
}

fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Heading {
    Heading::ALL[rng.gen_range(0..Heading::ALL.len())]
}

fn random_pose<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Pose {
    Pose::new(grid.sample(rng), random_heading(rng))
}

#[cfg(test)]
mod tests {
    use super::super::lights::Phase;
    use super::super::testing;
    use super::*;
    use rstest::rstest;

    const CENTER: Intersection = Intersection::new(3, 3);
    const CORNER: Intersection = Intersection::new(8, 6);

    /// A world with a running trial routed to `CORNER`.
    ///
    /// Cab positions and lights are left for each test to arrange.
    fn world(num_dummies: usize, enforce_deadline: bool) -> TrafficWorld {
        let config = TrafficWorldConfig {
            num_dummies,
            enforce_deadline,
            ..TrafficWorldConfig::default()
        };
        let mut world = config.build_env(7).unwrap();
        world.reset();
        world.planner.route_to(CORNER);
        world
    }

    fn set_phase(world: &mut TrafficWorld, location: Intersection, phase: Phase) {
        let index = world.grid.index(location);
        world.lights[index] = TrafficLight::new(phase, 3);
    }

    #[test]
    fn reset_samples_trip() {
        let config = TrafficWorldConfig::default();
        let mut world = config.build_env(0).unwrap();
        assert_eq!(world.status(), TrialStatus::NotStarted);
        for _ in 0..50 {
            let destination = world.reset();
            let start = world.pose(CabId::PRIMARY).location;
            let distance = Grid::distance(start, destination);
            assert!(distance >= MIN_TRIP_DISTANCE);
            assert_eq!(world.deadline(), i64::from(distance * DEADLINE_PER_BLOCK));
            assert_eq!(world.status(), TrialStatus::Running);
            assert_eq!(world.time(), 0);
            assert_eq!(world.num_cabs(), 4);
        }
    }

    #[test]
    fn run_default() {
        let mut world = TrafficWorldConfig::default().build_env(3).unwrap();
        testing::run_random(&mut world, Grid::default(), 20, 4);
    }

    #[test]
    fn run_without_deadline() {
        let config = TrafficWorldConfig {
            enforce_deadline: false,
            ..TrafficWorldConfig::default()
        };
        let mut world = config.build_env(5).unwrap();
        testing::run_random(&mut world, Grid::default(), 5, 6);
    }

    #[rstest]
    #[case::two_by_two(2, 2)]
    #[case::no_columns(0, 6)]
    #[case::no_rows(8, 0)]
    fn small_grid_rejected(#[case] grid_width: u32, #[case] grid_height: u32) {
        let config = TrafficWorldConfig {
            grid_width,
            grid_height,
            ..TrafficWorldConfig::default()
        };
        assert!(matches!(
            config.build_env(0),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn forward_on_red_is_violation() {
        let mut world = world(0, true);
        let pose = Pose::new(CENTER, Heading::EAST);
        world.poses[0] = pose;
        set_phase(&mut world, CENTER, Phase::NorthSouth);

        assert_eq!(world.sense(CabId::PRIMARY).light, Light::Red);
        assert_eq!(world.act(CabId::PRIMARY, Action::Forward), REWARD_VIOLATION);
        assert_eq!(world.pose(CabId::PRIMARY), pose);
    }

    #[test]
    fn forward_on_green_along_route() {
        let mut world = world(0, true);
        world.poses[0] = Pose::new(CENTER, Heading::EAST);
        world.planner.route_to(Intersection::new(7, 3));
        set_phase(&mut world, CENTER, Phase::EastWest);

        assert_eq!(world.act(CabId::PRIMARY, Action::Forward), REWARD_ON_ROUTE);
        assert_eq!(
            world.pose(CabId::PRIMARY),
            Pose::new(Intersection::new(4, 3), Heading::EAST)
        );
    }

    #[test]
    fn right_on_red_off_route() {
        let mut world = world(0, true);
        world.poses[0] = Pose::new(CENTER, Heading::EAST);
        world.planner.route_to(Intersection::new(7, 3));
        set_phase(&mut world, CENTER, Phase::NorthSouth);

        assert_eq!(world.act(CabId::PRIMARY, Action::Right), REWARD_OFF_ROUTE);
        assert_eq!(
            world.pose(CabId::PRIMARY),
            Pose::new(Intersection::new(3, 4), Heading::SOUTH)
        );
    }

    #[test]
    fn idle_is_neutral() {
        let mut world = world(0, true);
        let pose = Pose::new(CENTER, Heading::EAST);
        world.poses[0] = pose;
        assert_eq!(world.act(CabId::PRIMARY, Action::Idle), 0.0);
        assert_eq!(world.pose(CabId::PRIMARY), pose);
    }

    #[test]
    fn sense_other_cabs() {
        let mut world = world(3, true);
        world.poses[0] = Pose::new(CENTER, Heading::EAST);
        world.poses[1] = Pose::new(CENTER, Heading::WEST);
        world.poses[2] = Pose::new(CENTER, Heading::NORTH);
        world.poses[3] = Pose::new(CENTER, Heading::SOUTH);
        world.dummies[0].waypoint = Action::Left;
        world.dummies[1].waypoint = Action::Forward;
        world.dummies[2].waypoint = Action::Right;

        let inputs = world.sense(CabId::PRIMARY);
        assert_eq!(inputs.oncoming, Action::Left);
        assert_eq!(inputs.right, Action::Forward);
        assert_eq!(inputs.left, Action::Right);
    }

    #[test]
    fn left_blocked_by_oncoming() {
        let mut world = world(1, true);
        world.poses[0] = Pose::new(CENTER, Heading::EAST);
        world.poses[1] = Pose::new(CENTER, Heading::WEST);
        world.dummies[0].waypoint = Action::Forward;
        set_phase(&mut world, CENTER, Phase::EastWest);

        assert_eq!(world.act(CabId::PRIMARY, Action::Left), REWARD_VIOLATION);
        assert_eq!(world.pose(CabId::PRIMARY).location, CENTER);
    }

    #[test]
    fn reaching_destination_succeeds() {
        let mut world = world(0, true);
        world.poses[0] = Pose::new(CENTER, Heading::EAST);
        world.planner.route_to(Intersection::new(4, 3));
        world.deadline = 5;
        set_phase(&mut world, CENTER, Phase::EastWest);

        let reward = world.act(CabId::PRIMARY, Action::Forward);
        assert_eq!(reward, REWARD_ON_ROUTE + REWARD_ARRIVAL);
        assert_eq!(
            world.status(),
            TrialStatus::Finished(TrialOutcome::Succeeded)
        );
        assert!(world.is_done());
    }

    #[test]
    fn late_arrival_has_no_bonus() {
        let mut world = world(0, false);
        world.poses[0] = Pose::new(CENTER, Heading::EAST);
        world.planner.route_to(Intersection::new(4, 3));
        world.deadline = -3;
        set_phase(&mut world, CENTER, Phase::EastWest);

        assert_eq!(world.act(CabId::PRIMARY, Action::Forward), REWARD_ON_ROUTE);
        assert!(world.is_done());
    }

    #[test]
    fn deadline_exceeded() {
        let mut world = world(0, true);
        world.deadline = 2;
        world.end_tick();
        world.end_tick();
        assert_eq!(world.status(), TrialStatus::Running);
        world.end_tick();
        assert_eq!(
            world.status(),
            TrialStatus::Finished(TrialOutcome::Failed(FailureReason::DeadlineExceeded))
        );
        assert_eq!(world.deadline(), -1);
        assert_eq!(world.time(), 3);
    }

    #[test]
    fn hard_time_limit_without_deadline() {
        let mut world = world(0, false);
        world.deadline = 0;
        world.end_tick();
        assert_eq!(world.status(), TrialStatus::Running);
        world.deadline = HARD_TIME_LIMIT + 1;
        world.end_tick();
        assert_eq!(world.status(), TrialStatus::Running);
        world.end_tick();
        assert_eq!(
            world.status(),
            TrialStatus::Finished(TrialOutcome::Failed(FailureReason::HardTimeLimit))
        );
    }

    #[test]
    fn finished_trial_stops_counting() {
        let mut world = world(0, true);
        world.status = TrialStatus::Finished(TrialOutcome::Succeeded);
        let deadline = world.deadline();
        world.end_tick();
        assert_eq!(world.deadline(), deadline);
        assert_eq!(world.time(), 0);
    }

    #[test]
    fn dummy_waits_at_red() {
        let mut world = world(1, true);
        let far = Intersection::new(7, 5);
        world.poses[0] = Pose::new(far, Heading::EAST);
        let pose = Pose::new(CENTER, Heading::EAST);
        world.poses[1] = pose;
        world.dummies[0].waypoint = Action::Forward;
        set_phase(&mut world, CENTER, Phase::NorthSouth);

        world.advance();
        assert_eq!(world.pose(CabId(1)), pose);
        assert_eq!(world.dummies[0].waypoint, Action::Forward);
    }

    #[test]
    fn dummy_moves_on_green() {
        let mut world = world(1, true);
        world.poses[0] = Pose::new(Intersection::new(7, 5), Heading::EAST);
        world.poses[1] = Pose::new(CENTER, Heading::EAST);
        world.dummies[0].waypoint = Action::Forward;
        set_phase(&mut world, CENTER, Phase::EastWest);

        world.advance();
        assert_eq!(world.pose(CabId(1)).location, Intersection::new(4, 3));
    }
}

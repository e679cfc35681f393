//! Random baseline agent
use super::Agent;
use crate::envs::{CabId, Environment, Intersection, RoutePlanner};
use crate::logging::Logger;
use crate::simulation::Step;
use crate::spaces::{sample_indexed, Inputs, State};
use crate::Prng;
use rand::SeedableRng;
use std::fmt;

/// An agent that always acts randomly.
///
/// Still follows the route planner so that its steps report the same states as a learning agent.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    planner: RoutePlanner,
    rng: Prng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            planner: RoutePlanner::new(),
            rng: Prng::seed_from_u64(seed),
        }
    }

    fn observe(&self, env: &dyn Environment) -> (Inputs, State) {
        let waypoint = self.planner.next_waypoint(env.pose(CabId::PRIMARY));
        let inputs = env.sense(CabId::PRIMARY);
        (inputs, State::encode(&inputs, waypoint))
    }
}

impl Agent for RandomAgent {
    fn reset(&mut self, destination: Intersection) {
        self.planner.route_to(destination);
    }

    fn update(&mut self, env: &mut dyn Environment, _logger: &mut dyn Logger) -> Step {
        let deadline = env.deadline();
        let (inputs, state) = self.observe(env);
        let action = sample_indexed(&mut self.rng);
        let reward = env.act(CabId::PRIMARY, action);
        Step {
            inputs,
            state,
            action,
            reward,
            next_state: self.observe(env).1,
            deadline,
            trial_done: env.is_done(),
        }
    }
}

impl fmt::Display for RandomAgent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RandomAgent")
    }
}

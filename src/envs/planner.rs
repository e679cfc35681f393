//! Route planning
use super::grid::{Intersection, Pose};
use crate::spaces::Action;

/// Suggests the locally best move toward a destination, ignoring traffic.
///
/// Closes the east-west gap first, then the north-south gap.
/// A cab facing away from the destination is sent right to begin a long U-turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutePlanner {
    destination: Option<Intersection>,
}

impl RoutePlanner {
    pub const fn new() -> Self {
        Self { destination: None }
    }

    pub fn route_to(&mut self, destination: Intersection) {
        self.destination = Some(destination);
    }

    pub const fn destination(&self) -> Option<Intersection> {
        self.destination
    }

    /// Next waypoint for a cab at `pose`.
    ///
    /// [`Action::Idle`] at the destination or when no route is set.
    pub fn next_waypoint(&self, pose: Pose) -> Action {
        let destination = match self.destination {
            Some(destination) => destination,
            None => return Action::Idle,
        };
        let dx = destination.x - pose.location.x;
        let dy = destination.y - pose.location.y;
        let heading = pose.heading;

        if dx != 0 {
            let along = dx * heading.dx;
            if along > 0 {
                Action::Forward
            } else if along < 0 {
                Action::Right
            } else if dx * heading.dy > 0 {
                Action::Left
            } else {
                Action::Right
            }
        } else if dy != 0 {
            let along = dy * heading.dy;
            if along > 0 {
                Action::Forward
            } else if along < 0 {
                Action::Right
            } else if dy * heading.dx > 0 {
                Action::Right
            } else {
                Action::Left
            }
        } else {
            Action::Idle
        }
    }
}

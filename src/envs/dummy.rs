//! Background traffic
use crate::spaces::{Action, Inputs, Light};
use rand::Rng;

/// A non-learning cab that wanders the grid while obeying traffic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DummyCab {
    /// The move this cab intends to make next.
    pub waypoint: Action,
}

impl DummyCab {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            waypoint: random_move(rng),
        }
    }

    /// Whether the intended move is legal given the sensor inputs.
    pub fn may_proceed(&self, inputs: &Inputs) -> bool {
        match self.waypoint {
            Action::Right => !(inputs.light == Light::Red && inputs.left == Action::Forward),
            Action::Forward => inputs.light == Light::Green,
            Action::Left => {
                inputs.light == Light::Green
                    && !matches!(inputs.oncoming, Action::Forward | Action::Right)
            }
            Action::Idle => true,
        }
    }

    /// Choose an action for this tick.
    ///
    /// Moves along the intended waypoint when legal and then picks a new waypoint;
    /// otherwise waits.
    pub fn decide<R: Rng + ?Sized>(&mut self, inputs: &Inputs, rng: &mut R) -> Action {
        if self.may_proceed(inputs) {
            let action = self.waypoint;
            self.waypoint = random_move(rng);
            action
        } else {
            Action::Idle
        }
    }
}

fn random_move<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::MOVES[rng.gen_range(0..Action::MOVES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Prng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn inputs(light: Light, oncoming: Action, left: Action) -> Inputs {
        Inputs {
            light,
            oncoming,
            left,
            right: Action::Idle,
        }
    }

    #[rstest]
    #[case(Action::Forward, inputs(Light::Red, Action::Idle, Action::Idle), false)]
    #[case(Action::Forward, inputs(Light::Green, Action::Idle, Action::Idle), true)]
    #[case(Action::Right, inputs(Light::Red, Action::Idle, Action::Idle), true)]
    #[case(Action::Right, inputs(Light::Red, Action::Idle, Action::Forward), false)]
    #[case(Action::Left, inputs(Light::Green, Action::Forward, Action::Idle), false)]
    #[case(Action::Left, inputs(Light::Green, Action::Left, Action::Idle), true)]
    #[case(Action::Left, inputs(Light::Red, Action::Idle, Action::Idle), false)]
    fn may_proceed(#[case] waypoint: Action, #[case] inputs: Inputs, #[case] expected: bool) {
        assert_eq!(DummyCab { waypoint }.may_proceed(&inputs), expected);
    }

    #[test]
    fn waits_at_red() {
        let mut rng = Prng::seed_from_u64(0);
        let mut cab = DummyCab {
            waypoint: Action::Forward,
        };
        let action = cab.decide(&inputs(Light::Red, Action::Idle, Action::Idle), &mut rng);
        assert_eq!(action, Action::Idle);
        assert_eq!(cab.waypoint, Action::Forward);
    }

    #[test]
    fn proceeds_and_replans() {
        let mut rng = Prng::seed_from_u64(0);
        let mut cab = DummyCab {
            waypoint: Action::Forward,
        };
        let action = cab.decide(&inputs(Light::Green, Action::Idle, Action::Idle), &mut rng);
        assert_eq!(action, Action::Forward);
        assert_ne!(cab.waypoint, Action::Idle);
    }
}

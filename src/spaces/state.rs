//! Traffic state as seen from the driver's seat.
use super::{Indexed, InvalidStateKind};
use enum_map::Enum;
use std::fmt;
use std::str::FromStr;

/// Traffic light colour facing a cab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
pub enum Light {
    Red,
    Green,
}

impl Default for Light {
    fn default() -> Self {
        Self::Red
    }
}

impl Indexed for Light {
    const SIZE: usize = 2;

    fn as_index(&self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Green),
            _ => None,
        }
    }
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
        }
    }
}

impl FromStr for Light {
    type Err = InvalidStateKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            _ => Err(InvalidStateKind::UnknownLight(s.into())),
        }
    }
}

/// A driving action at an intersection.
///
/// Also describes route waypoints and the intentions of other cabs.
/// The variant order is the canonical action order used for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
pub enum Action {
    /// Stay at the intersection.
    Idle,
    Forward,
    Left,
    Right,
}

impl Action {
    /// All actions in canonical order.
    pub const ALL: [Self; 4] = [Self::Idle, Self::Forward, Self::Left, Self::Right];

    /// Actions that move the cab.
    pub const MOVES: [Self; 3] = [Self::Forward, Self::Left, Self::Right];
}

impl Default for Action {
    fn default() -> Self {
        Self::Idle
    }
}

impl Indexed for Action {
    const SIZE: usize = 4;

    fn as_index(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Forward => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "None"),
            Self::Forward => write!(f, "forward"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Action {
    type Err = InvalidStateKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "none" | "idle" => Ok(Self::Idle),
            "forward" => Ok(Self::Forward),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(InvalidStateKind::UnknownAction(s.into())),
        }
    }
}

/// Sensor readings for a cab at its current intersection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Inputs {
    /// Light facing the cab.
    pub light: Light,
    /// Intended action of the oncoming cab, if any.
    pub oncoming: Action,
    /// Intended action of the cab approaching from the left, if any.
    pub left: Action,
    /// Intended action of the cab approaching from the right, if any.
    pub right: Action,
}

impl fmt::Display for Inputs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{light: {}, oncoming: {}, left: {}, right: {}}}",
            self.light, self.oncoming, self.left, self.right
        )
    }
}

/// Discretized state used by the learning agent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub light: Light,
    /// Next waypoint suggested by the route planner.
    pub waypoint: Action,
    pub oncoming: Action,
    pub left: Action,
}

impl State {
    pub const fn new(light: Light, waypoint: Action, oncoming: Action, left: Action) -> Self {
        Self {
            light,
            waypoint,
            oncoming,
            left,
        }
    }

    /// Encode sensor inputs and the planned waypoint as a state.
    ///
    /// The reading for traffic from the right is not part of the state.
    pub const fn encode(inputs: &Inputs, waypoint: Action) -> Self {
        Self::new(inputs.light, waypoint, inputs.oncoming, inputs.left)
    }

    /// Parse a state from its textual labels, e.g. `("red", "forward", "None", "None")`.
    pub fn from_labels(
        light: &str,
        waypoint: &str,
        oncoming: &str,
        left: &str,
    ) -> Result<Self, InvalidStateKind> {
        Ok(Self::new(
            light.parse()?,
            waypoint.parse()?,
            oncoming.parse()?,
            left.parse()?,
        ))
    }

    /// Decode a state from its index.
    pub fn try_from_index(index: usize) -> Result<Self, InvalidStateKind> {
        Self::from_index(index).ok_or(InvalidStateKind::IndexOutOfRange {
            index,
            size: Self::SIZE,
        })
    }
}

impl Indexed for State {
    const SIZE: usize = Light::SIZE * Action::SIZE * Action::SIZE * Action::SIZE;

    fn as_index(&self) -> usize {
        let mut index = self.light.as_index();
        index = index * Action::SIZE + self.waypoint.as_index();
        index = index * Action::SIZE + self.oncoming.as_index();
        index * Action::SIZE + self.left.as_index()
    }

    fn from_index(index: usize) -> Option<Self> {
        if index >= Self::SIZE {
            return None;
        }
        let left = Action::from_index(index % Action::SIZE)?;
        let index = index / Action::SIZE;
        let oncoming = Action::from_index(index % Action::SIZE)?;
        let index = index / Action::SIZE;
        let waypoint = Action::from_index(index % Action::SIZE)?;
        let light = Light::from_index(index / Action::SIZE)?;
        Some(Self::new(light, waypoint, oncoming, left))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.light, self.waypoint, self.oncoming, self.left
        )
    }
}

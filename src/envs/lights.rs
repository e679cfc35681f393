//! Traffic lights
use super::grid::Heading;
use crate::spaces::Light;
use rand::Rng;

/// Which axis of an intersection has right of way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NorthSouth,
    EastWest,
}

impl Phase {
    const fn flip(self) -> Self {
        match self {
            Self::NorthSouth => Self::EastWest,
            Self::EastWest => Self::NorthSouth,
        }
    }
}

/// A traffic light that alternates phases with a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrafficLight {
    pub phase: Phase,
    /// Number of ticks between phase changes.
    pub period: u64,
    last_updated: u64,
}

impl TrafficLight {
    /// Periods a randomly initialized light may have.
    pub const PERIODS: [u64; 3] = [3, 4, 5];

    pub const fn new(phase: Phase, period: u64) -> Self {
        Self {
            phase,
            period,
            last_updated: 0,
        }
    }

    /// A light with a random initial phase and period.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let phase = if rng.gen() {
            Phase::NorthSouth
        } else {
            Phase::EastWest
        };
        let period = Self::PERIODS[rng.gen_range(0..Self::PERIODS.len())];
        Self::new(phase, period)
    }

    pub fn reset(&mut self) {
        self.last_updated = 0;
    }

    /// Switch phase if a full period has elapsed at time `t`.
    pub fn update(&mut self, t: u64) {
        if t.saturating_sub(self.last_updated) >= self.period {
            self.phase = self.phase.flip();
            self.last_updated = t;
        }
    }

    /// Light shown to a cab travelling with the given heading.
    pub const fn light_for(&self, heading: Heading) -> Light {
        match (self.phase, heading.is_vertical()) {
            (Phase::NorthSouth, true) | (Phase::EastWest, false) => Light::Green,
            _ => Light::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Prng;
    use rand::SeedableRng;

    #[test]
    fn flips_after_period() {
        let mut light = TrafficLight::new(Phase::NorthSouth, 3);
        for t in 0..3 {
            light.update(t);
            assert_eq!(light.phase, Phase::NorthSouth);
        }
        light.update(3);
        assert_eq!(light.phase, Phase::EastWest);
        light.update(5);
        assert_eq!(light.phase, Phase::EastWest);
        light.update(6);
        assert_eq!(light.phase, Phase::NorthSouth);
    }

    #[test]
    fn reset_restarts_period() {
        let mut light = TrafficLight::new(Phase::EastWest, 4);
        light.update(4);
        assert_eq!(light.phase, Phase::NorthSouth);
        light.reset();
        light.update(4);
        assert_eq!(light.phase, Phase::EastWest);
    }

    #[test]
    fn light_depends_on_heading() {
        let light = TrafficLight::new(Phase::NorthSouth, 3);
        assert_eq!(light.light_for(Heading::NORTH), Light::Green);
        assert_eq!(light.light_for(Heading::SOUTH), Light::Green);
        assert_eq!(light.light_for(Heading::EAST), Light::Red);
        assert_eq!(light.light_for(Heading::WEST), Light::Red);
    }

    #[test]
    fn random_period() {
        let mut rng = Prng::seed_from_u64(1);
        for _ in 0..20 {
            let light = TrafficLight::random(&mut rng);
            assert!(TrafficLight::PERIODS.contains(&light.period));
        }
    }
}

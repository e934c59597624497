//! Tank with a per-tick drain disturbance.

use lv_core::numeric::Real;
use lv_core::rng::RandomSource;

/// Bias favoring an increasing drain when the stochastic model is active.
/// Empirical domain constant, not tunable.
const DRAIN_RAISE_THRESHOLD: Real = 0.56;

/// Per-tick tank result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankTick {
    /// Level after this tick's drain, clamped to `[0, max_level]`.
    pub level: Real,
    /// Volume drained this tick, clamped to `[min_drain, max_drain]`.
    pub drained: Real,
}

/// Fluid reservoir drained each tick by the disturbance model.
///
/// Drain magnitude is either a random walk around the previous tick's drain
/// (stochastic mode) or a level-dependent deterministic ramp. The previous
/// drain is retained so consecutive stochastic drains stay continuous.
#[derive(Clone, Debug)]
pub struct Tank {
    /// Current fluid level.
    pub level: Real,
    max_level: Real,
    max_drain: Real,
    min_drain: Real,
    last_drain: Real,
    variable_drain: bool,
}

impl Tank {
    pub fn new(variable_drain: bool) -> Self {
        Self {
            level: 0.0,
            max_level: 100.0,
            max_drain: 5.0,
            min_drain: 0.0,
            last_drain: 5.0,
            variable_drain,
        }
    }

    pub fn max_level(&self) -> Real {
        self.max_level
    }

    /// Compute this tick's drain magnitude, retaining it as `last_drain`.
    fn next_drain(&mut self, rng: &mut RandomSource) -> Real {
        let walk_range = (self.min_drain - self.max_drain) / 25.0;
        let raw = if self.variable_drain {
            if rng.next() > DRAIN_RAISE_THRESHOLD {
                self.last_drain + rng.next() * walk_range
            } else {
                self.last_drain - rng.next() * walk_range
            }
        } else {
            self.max_drain - 1.0 + self.max_drain * (self.level / 500.0)
        };
        let drain = raw.clamp(self.min_drain, self.max_drain);
        self.last_drain = drain;
        drain
    }

    /// Advance one tick: drain, then clamp the level into `[0, max_level]`.
    /// Total; never fails.
    pub fn step(&mut self, rng: &mut RandomSource) -> TankTick {
        let drained = self.next_drain(rng);
        self.level = (self.level - drained).clamp(0.0, self.max_level);
        TankTick {
            level: self.level,
            drained,
        }
    }

    /// Add pumped inflow. Applied unclamped; the next drain step re-clamps
    /// the level into range.
    pub fn fill(&mut self, volume: Real) {
        self.level += volume;
    }
}

//! Rate-limited pump feeding the tank.

use lv_core::numeric::Real;

/// Per-tick pump result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PumpTick {
    /// Volume pumped into the tank this tick.
    pub pumped: Real,
    /// Speed after this tick, clamped to `[0, max_speed]`.
    pub speed: Real,
}

/// Pump whose speed chases a commanded target under an acceleration cap.
///
/// Speed moves toward the stored target by at most `acceleration` per tick,
/// never instantaneously. Pumped volume is `speed * water_per_speed`.
///
/// A command of exactly zero is ignored and the previous target is kept;
/// the feedback loop floors its commands at 0.001 so a legitimate
/// "stop the pump" command never collides with this. See the plant docs.
#[derive(Clone, Debug)]
pub struct Pump {
    /// Current speed.
    pub speed: Real,
    set_speed: Real,
    max_speed: Real,
    acceleration: Real,
    water_per_speed: Real,
}

impl Pump {
    pub fn new(acceleration: Real) -> Self {
        let max_speed = 100.0;
        let capacity = 7.0;
        Self {
            speed: 0.0,
            // Initial target before the first controller command lands.
            set_speed: 75.0,
            max_speed,
            acceleration,
            water_per_speed: capacity / max_speed,
        }
    }

    pub fn set_speed(&self) -> Real {
        self.set_speed
    }

    /// Advance one tick. `command` replaces the stored target unless it is
    /// absent or exactly zero. Total; never fails.
    pub fn step(&mut self, command: Option<Real>) -> PumpTick {
        if let Some(target) = command {
            if target != 0.0 {
                self.set_speed = target;
            }
        }
        let diff = self.speed - self.set_speed;
        if diff > 0.0 {
            self.speed -= diff.min(self.acceleration);
        } else {
            self.speed += diff.abs().min(self.acceleration);
        }
        self.speed = self.speed.clamp(0.0, self.max_speed);
        PumpTick {
            pumped: self.speed * self.water_per_speed,
            speed: self.speed,
        }
    }
}

//! The closed feedback loop: tank + pump + discrete PID controller.

use std::collections::VecDeque;

use lv_core::numeric::Real;
use lv_core::rng::RandomSource;

use crate::config::Settings;
use crate::pump::{Pump, PumpTick};
use crate::tank::{Tank, TankTick};

/// Smallest command the controller will emit. Keeps the output strictly
/// positive so it is never mistaken for the pump's "no command" zero.
const COMMAND_FLOOR: Real = 0.001;

/// Everything one tick produces.
#[derive(Clone, Copy, Debug)]
pub struct LoopTick {
    pub tank: TankTick,
    pub pump: PumpTick,
    /// Setpoint in effect during this tick.
    pub setpoint: Real,
    /// Integral accumulator after this tick.
    pub integral: Real,
}

/// One tank/pump pair under PID control.
///
/// Each tick, in order:
/// 1. the tank drains,
/// 2. the pump executes the command computed on the previous tick and its
///    output volume flows into the tank,
/// 3. the fresh level enters a fixed-length delay queue and the oldest
///    queued level becomes the "measured" value, modeling `process_delay`
///    ticks of sensor/actuation lag,
/// 4. the PID terms over `setpoint - measured` produce the next command,
///    floored at [`COMMAND_FLOOR`].
///
/// The integral accumulator is unbounded; windup under a long saturated
/// excursion is a known limitation of the modeled plant, not corrected here.
#[derive(Clone, Debug)]
pub struct LevelLoop {
    tank: Tank,
    pump: Pump,
    rng: RandomSource,
    /// Delay line; length stays equal to the configured process delay.
    feedback: VecDeque<Real>,
    p: Real,
    i: Real,
    d: Real,
    bias: Real,
    error_prior: Real,
    integral: Real,
    command: Real,
}

impl LevelLoop {
    /// Build a fresh loop from a settings snapshot. No state is shared with
    /// any other loop instance.
    pub fn new(settings: &Settings) -> Self {
        let mut feedback = VecDeque::with_capacity(settings.process_delay + 1);
        feedback.extend(std::iter::repeat(0.0).take(settings.process_delay));
        Self {
            tank: Tank::new(settings.variable_drain),
            pump: Pump::new(settings.acceleration),
            rng: RandomSource::from_flag(settings.use_prng, settings.seed),
            feedback,
            p: settings.p,
            i: settings.i,
            d: settings.d,
            bias: 0.0,
            error_prior: 0.0,
            integral: 0.0,
            command: 0.0,
        }
    }

    /// Advance one tick against the given setpoint. Total; never fails.
    pub fn tick(&mut self, setpoint: Real) -> LoopTick {
        let tank = self.tank.step(&mut self.rng);
        let pump = self.pump.step(Some(self.command));
        self.tank.fill(pump.pumped);

        // Delayed measurement: push the fresh level, observe the oldest.
        self.feedback.push_back(tank.level);
        let measured = self.feedback.pop_front().unwrap_or(tank.level);

        let error = setpoint - measured;
        let proportional = self.p * error;
        self.integral += error * self.i;
        let derivative = (error - self.error_prior) * self.d;
        self.error_prior = error;
        self.command =
            (proportional + self.integral + derivative + self.bias).max(COMMAND_FLOOR);

        LoopTick {
            tank,
            pump,
            setpoint,
            integral: self.integral,
        }
    }
}

//! Simulation runner and per-tick series recording.

use lv_core::numeric::Real;
use tracing::debug;

use crate::config::Settings;
use crate::plant::LevelLoop;

/// Setpoint values used by the two-step schedule.
const SCHEDULE_SECOND: Real = 25.0;
const SCHEDULE_THIRD: Real = 75.0;

/// Parallel per-tick series recorded over one run. All five vectors have
/// length `simulation_length`.
#[derive(Clone, Debug, Default)]
pub struct TickSeries {
    pub drain: Vec<Real>,
    pub level: Vec<Real>,
    pub pump_speed: Vec<Real>,
    pub setpoint: Vec<Real>,
    pub integral: Vec<Real>,
}

impl TickSeries {
    fn with_capacity(n: usize) -> Self {
        Self {
            drain: Vec::with_capacity(n),
            level: Vec::with_capacity(n),
            pump_speed: Vec::with_capacity(n),
            setpoint: Vec::with_capacity(n),
            integral: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.level.len()
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_empty()
    }
}

/// Drive a fresh [`LevelLoop`] for `simulation_length` ticks and record the
/// per-tick series.
///
/// When `variable_setpoint` is set, the setpoint steps to 25 at tick
/// `len / 3` and to 75 at tick `2 * len / 3`, each change taking effect
/// on the scheduled tick itself. Deterministic for a given snapshot when
/// `use_prng` is set; run-to-run variable otherwise.
pub fn run_simulation(settings: &Settings) -> TickSeries {
    let n = settings.simulation_length;
    let mut plant = LevelLoop::new(settings);
    let mut series = TickSeries::with_capacity(n);
    let mut setpoint = settings.setpoint;

    for tick in 0..n {
        if settings.variable_setpoint {
            if tick == n / 3 {
                setpoint = SCHEDULE_SECOND;
            } else if tick == 2 * n / 3 {
                setpoint = SCHEDULE_THIRD;
            }
        }
        let out = plant.tick(setpoint);
        series.drain.push(out.tank.drained);
        series.level.push(out.tank.level);
        series.pump_speed.push(out.pump.speed);
        series.setpoint.push(out.setpoint);
        series.integral.push(out.integral);
    }

    debug!(
        ticks = n,
        final_level = series.level.last().copied().unwrap_or(0.0),
        "simulation run complete"
    );
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_are_parallel_and_full_length() {
        let s = Settings {
            simulation_length: 123,
            use_prng: true,
            ..Settings::default()
        };
        let out = run_simulation(&s);
        assert_eq!(out.len(), 123);
        assert_eq!(out.drain.len(), 123);
        assert_eq!(out.pump_speed.len(), 123);
        assert_eq!(out.setpoint.len(), 123);
        assert_eq!(out.integral.len(), 123);
    }

    #[test]
    fn fixed_setpoint_is_constant() {
        let s = Settings {
            simulation_length: 60,
            variable_setpoint: false,
            setpoint: 42.0,
            use_prng: true,
            ..Settings::default()
        };
        let out = run_simulation(&s);
        assert!(out.setpoint.iter().all(|&sp| sp == 42.0));
    }

    #[test]
    fn setpoint_schedule_boundaries() {
        let s = Settings {
            simulation_length: 300,
            variable_setpoint: true,
            setpoint: 50.0,
            use_prng: true,
            ..Settings::default()
        };
        let out = run_simulation(&s);
        assert!(out.setpoint[..100].iter().all(|&sp| sp == 50.0));
        assert!(out.setpoint[100..200].iter().all(|&sp| sp == 25.0));
        assert!(out.setpoint[200..].iter().all(|&sp| sp == 75.0));
    }

    #[test]
    fn schedule_handles_non_divisible_lengths() {
        let s = Settings {
            simulation_length: 100,
            variable_setpoint: true,
            setpoint: 50.0,
            use_prng: true,
            ..Settings::default()
        };
        let out = run_simulation(&s);
        // floor(100/3) = 33, floor(200/3) = 66.
        assert_eq!(out.setpoint[32], 50.0);
        assert_eq!(out.setpoint[33], 25.0);
        assert_eq!(out.setpoint[65], 25.0);
        assert_eq!(out.setpoint[66], 75.0);
    }
}

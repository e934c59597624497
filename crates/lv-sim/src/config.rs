//! Run configuration.
//!
//! A [`Settings`] value is an immutable per-run snapshot: it is read by the
//! runner and the autotuner but never mutated during a run. The CLI loads it
//! from YAML and applies flag overrides before calling in.

use lv_core::numeric::{ensure_finite, Real};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Immutable per-run configuration bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Proportional gain.
    pub p: Real,
    /// Integral gain.
    pub i: Real,
    /// Derivative gain.
    pub d: Real,
    /// Target tank level.
    pub setpoint: Real,
    /// Tick count per simulation run.
    pub simulation_length: usize,
    /// Step the setpoint to 25 at 1/3 and to 75 at 2/3 of the run.
    pub variable_setpoint: bool,
    /// Stochastic drain model instead of the level-dependent ramp.
    pub variable_drain: bool,
    /// Reproducible seeded generator instead of the platform RNG.
    pub use_prng: bool,
    /// Seed for the reproducible generator.
    pub seed: u32,
    /// Pump per-tick speed-change cap.
    pub acceleration: Real,
    /// Measurement delay queue length, in ticks.
    pub process_delay: usize,
    /// Autotuner generation count.
    pub at_generations: usize,
    /// Benchmark repeat count under a stochastic drain.
    pub at_stability_factor: usize,
    /// Learning-rate root for the autotuner's decay schedule.
    pub at_training_root: Real,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            p: 2.0,
            i: 0.02,
            d: 0.5,
            setpoint: 50.0,
            simulation_length: 500,
            variable_setpoint: true,
            variable_drain: false,
            use_prng: false,
            seed: 1,
            acceleration: 4.0,
            process_delay: 0,
            at_generations: 25,
            at_stability_factor: 3,
            at_training_root: 1.8,
        }
    }
}

impl Settings {
    /// Reject settings a run cannot meaningfully execute with. Called by
    /// front ends before handing the snapshot to the runner or tuner.
    pub fn validate(&self) -> SimResult<()> {
        for (value, what) in [
            (self.p, "p gain"),
            (self.i, "i gain"),
            (self.d, "d gain"),
            (self.setpoint, "setpoint"),
            (self.acceleration, "acceleration"),
            (self.at_training_root, "at_training_root"),
        ] {
            ensure_finite(value, what)?;
        }
        if self.simulation_length == 0 {
            return Err(SimError::InvalidArg {
                what: "simulation_length must be at least 1",
            });
        }
        if self.acceleration <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "acceleration must be positive",
            });
        }
        if self.at_generations == 0 {
            return Err(SimError::InvalidArg {
                what: "at_generations must be at least 1",
            });
        }
        if self.at_stability_factor == 0 {
            return Err(SimError::InvalidArg {
                what: "at_stability_factor must be at least 1",
            });
        }
        if self.at_training_root <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "at_training_root must be positive",
            });
        }
        Ok(())
    }

    /// Copy of this snapshot with different gains, for tuner candidates.
    pub fn with_gains(&self, p: Real, i: Real, d: Real) -> Self {
        Self {
            p,
            i,
            d,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn zero_length_rejected() {
        let s = Settings {
            simulation_length: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn non_finite_gain_rejected() {
        let s = Settings {
            i: f64::NAN,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn zero_generations_rejected() {
        let s = Settings {
            at_generations: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn yaml_round_trip_with_partial_fields() {
        // Omitted fields fall back to defaults via serde(default).
        let s: Settings =
            serde_yaml::from_str("setpoint: 40.0\nsimulation_length: 100\nuse_prng: true\n")
                .unwrap();
        assert_eq!(s.setpoint, 40.0);
        assert_eq!(s.simulation_length, 100);
        assert!(s.use_prng);
        assert_eq!(s.p, 2.0);
    }
}

//! Integration tests: closed-loop behavior over whole runs.
//!
//! Covers:
//! - Bounds on level, drain, and pump speed over long runs
//! - Pump acceleration cap observed across recorded ticks
//! - Seeded determinism and system-RNG run-to-run variability
//! - Steady-state convergence under the reference gain set

use lv_core::numeric::{nearly_equal, Tolerances};
use lv_sim::{run_simulation, Settings};

fn base_settings() -> Settings {
    Settings {
        p: 2.0,
        i: 0.02,
        d: 0.5,
        setpoint: 50.0,
        simulation_length: 500,
        variable_setpoint: false,
        variable_drain: false,
        use_prng: true,
        seed: 1,
        ..Settings::default()
    }
}

#[test]
fn levels_and_drains_stay_in_range() {
    for variable_drain in [false, true] {
        let s = Settings {
            variable_drain,
            process_delay: 2,
            ..base_settings()
        };
        let out = run_simulation(&s);
        assert!(out.level.iter().all(|&l| (0.0..=100.0).contains(&l)));
        assert!(out.drain.iter().all(|&d| (0.0..=5.0).contains(&d)));
    }
}

#[test]
fn pump_speed_bounded_and_rate_limited() {
    let s = Settings {
        variable_drain: true,
        acceleration: 4.0,
        ..base_settings()
    };
    let out = run_simulation(&s);
    assert!(out.pump_speed.iter().all(|&v| (0.0..=100.0).contains(&v)));
    for pair in out.pump_speed.windows(2) {
        assert!((pair[1] - pair[0]).abs() <= 4.0 + 1e-12);
    }
}

#[test]
fn seeded_runs_are_identical() {
    let s = Settings {
        variable_drain: true,
        ..base_settings()
    };
    let a = run_simulation(&s);
    let b = run_simulation(&s);
    assert_eq!(a.drain, b.drain);
    assert_eq!(a.level, b.level);
    assert_eq!(a.pump_speed, b.pump_speed);
    assert_eq!(a.setpoint, b.setpoint);
    assert_eq!(a.integral, b.integral);
}

#[test]
fn system_rng_runs_differ() {
    let s = Settings {
        variable_drain: true,
        use_prng: false,
        ..base_settings()
    };
    // A single 500-tick stochastic run repeating exactly is vanishingly
    // unlikely; allow a few attempts to keep flakiness negligible.
    let reference = run_simulation(&s);
    let differs = (0..3).any(|_| run_simulation(&s).level != reference.level);
    assert!(differs);
}

#[test]
fn reference_gains_converge_to_setpoint() {
    let out = run_simulation(&base_settings());
    for (tick, &level) in out.level.iter().enumerate().skip(450) {
        assert!(
            (level - 50.0).abs() <= 2.0,
            "tick {tick}: level {level} outside steady-state band"
        );
    }
    // Settled means the tick-to-tick ripple has died down too.
    let ripple = Tolerances { abs: 0.15, rel: 0.0 };
    for pair in out.level[450..].windows(2) {
        assert!(nearly_equal(pair[0], pair[1], ripple));
    }
}

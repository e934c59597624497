//! Single-tank, single-pump liquid-level process simulation.
//!
//! Provides:
//! - Tank with a stochastic or deterministic per-tick drain (disturbance)
//! - Pump with rate-limited speed tracking toward a commanded setpoint
//! - Discrete-time PID feedback loop with configurable measurement delay
//! - Simulation runner that drives N ticks and records per-tick series
//!
//! # Design Principles
//!
//! - **Explicit configuration**: every component is constructed from an
//!   immutable [`Settings`] snapshot; nothing reads ambient global state
//! - **Fresh state per run**: each [`run_simulation`] call builds its own
//!   tank, pump, and controller, so benchmark runs stay independent
//! - **Total arithmetic**: tick updates are clamped numeric functions with
//!   no failure modes; validation happens once, at the settings boundary

pub mod config;
pub mod error;
pub mod plant;
pub mod pump;
pub mod runner;
pub mod tank;

pub use config::Settings;
pub use error::{SimError, SimResult};
pub use plant::{LevelLoop, LoopTick};
pub use pump::{Pump, PumpTick};
pub use runner::{run_simulation, TickSeries};
pub use tank::{Tank, TankTick};

//! Scoring and coordinate-ascent PID autotuning for levelsim.
//!
//! [`benchmark`] reduces a simulation run (or several, under a stochastic
//! drain) to a scalar tracking-error score, and [`autotune`] performs a
//! generations-bounded greedy local search over the three PID gains with a
//! decaying step size, evaluating six neighbor candidates per generation.

pub mod error;
pub mod score;
pub mod tuner;

pub use error::{TuneError, TuneResult};
pub use score::{benchmark, score_series};
pub use tuner::{autotune, neighbors, Gains, GenerationRecord, TuneOutcome};

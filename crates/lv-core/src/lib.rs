//! lv-core: stable foundation for the levelsim workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - rng (seedable uniform random source for the disturbance model)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod rng;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LvError, LvResult};
pub use numeric::*;
pub use rng::RandomSource;

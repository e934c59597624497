//! Error types for tuning operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuneError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Settings rejected: {0}")]
    Settings(#[from] lv_sim::SimError),
}

pub type TuneResult<T> = Result<T, TuneError>;

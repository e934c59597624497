//! Error types for simulation operations.

use thiserror::Error;

/// Errors surfaced at the settings boundary. Tick updates themselves are
/// total and never fail.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite setting: {what}")]
    NonFinite { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<lv_core::LvError> for SimError {
    fn from(e: lv_core::LvError) -> Self {
        match e {
            lv_core::LvError::NonFinite { what, .. } => SimError::NonFinite { what },
            lv_core::LvError::InvalidArg { what } => SimError::InvalidArg { what },
        }
    }
}

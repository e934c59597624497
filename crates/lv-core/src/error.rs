use thiserror::Error;

pub type LvResult<T> = Result<T, LvError>;

#[derive(Error, Debug)]
pub enum LvError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

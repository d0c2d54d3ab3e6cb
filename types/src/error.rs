//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for shared Civitas types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CivitasError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("{param} = {value} is outside its safety band [{min}, {max}]")]
    ParamOutOfBounds {
        param: &'static str,
        value: u128,
        min: u128,
        max: u128,
    },

    #[error("invalid token metadata: {0}")]
    InvalidMetadata(String),

    #[error("{0}")]
    Other(String),
}

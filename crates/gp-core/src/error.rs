//! Core error type.
//!
//! Routing infeasibility is never an error: it is reported as data (a
//! fallback route or a large negative reward).  Errors are reserved for
//! malformed input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown vehicle type {0:?} (expected ev, petrol or hybrid)")]
    UnknownVehicleType(String),

    #[error("unknown priority {0:?} (expected critical, high, standard or low)")]
    UnknownPriority(String),

    #[error("invalid time {0:?} (expected HH:MM)")]
    InvalidTime(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `gp-core`.
pub type CoreResult<T> = Result<T, CoreError>;

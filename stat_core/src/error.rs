//! Error types for stat construction and persistence

use thiserror::Error;

/// Invalid arguments when creating or re-ranging a stat
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("{what} is not a number")]
    NotANumber { what: &'static str },
    #[error("{what} must be finite")]
    NotFinite { what: &'static str },
    #[error("Stat name must not be empty")]
    EmptyName,
}

/// Failure while restoring persisted base values
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to parse base values: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Base values must be a JSON object of name to number")]
    NotAnObject,
    #[error("Base value for '{name}' is not a number")]
    InvalidValue { name: String },
}

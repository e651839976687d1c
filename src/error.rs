//! Crate-wide error types.

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by solver backends before a terminal status is available.
///
/// Non-optimal outcomes (infeasible, unbounded, ...) are not errors; they are
/// reported through [`crate::domain::Solution::Failed`].
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("{backend} backend failed: {reason}")]
    Backend {
        backend: &'static str,
        reason: String,
    },

    #[error("{backend} returned {actual} values for {expected} channels")]
    DimensionMismatch {
        backend: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

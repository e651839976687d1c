//! Domain validation errors for water-filling inputs.
//!
//! These errors are returned by `try_new` constructors when an input violates
//! a domain invariant (empty channel set, non-positive floor, negative budget).
//!
//! # Examples
//!
//! ```
//! use waterfill::domain::error::DomainError;
//! use waterfill::domain::ChannelSet;
//!
//! let result = ChannelSet::try_new(vec![1.0, 0.0]);
//! assert!(matches!(
//!     result,
//!     Err(DomainError::NonPositiveFloor { index: 1, .. })
//! ));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// At least one channel is required.
    #[error("channel set cannot be empty")]
    EmptyChannels,

    /// Channel floors must be finite and strictly positive.
    #[error("floor of channel {index} must be positive and finite, got {value}")]
    NonPositiveFloor {
        /// Zero-based channel index.
        index: usize,
        /// The rejected floor value.
        value: f64,
    },

    /// The power budget must be finite and non-negative.
    #[error("power budget must be non-negative and finite, got {value}")]
    InvalidBudget {
        /// The rejected budget.
        value: f64,
    },

    /// A caller-declared channel count disagrees with the floor vector.
    #[error("channel count {expected} does not match {actual} floor values")]
    ChannelCountMismatch {
        /// Declared channel count.
        expected: usize,
        /// Number of floors supplied.
        actual: usize,
    },

    /// A side constraint does not have one coefficient per channel.
    #[error("constraint has {actual} coefficients, expected {expected}")]
    ConstraintDimension {
        /// Number of channels in the problem.
        expected: usize,
        /// Number of coefficients supplied.
        actual: usize,
    },

    /// Side constraint coefficients and right-hand sides must be finite.
    #[error("constraint contains a non-finite value")]
    NonFiniteConstraint,
}

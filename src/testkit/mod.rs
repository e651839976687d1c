//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Canonical water-filling problems with known optima.
//! - [`solver`] - A scripted [`ConvexSolver`](crate::port::ConvexSolver)
//!   for exercising the application layer without a backend.

pub mod domain;
pub mod solver;

//! Solver port for the water-filling convex program.
//!
//! Defines the trait implemented by external optimization backends. A backend
//! receives a validated [`WaterFillingProblem`] and reports its terminal
//! status together with raw variable values.
//!
//! # Overview
//!
//! - [`ConvexSolver`]: backend interface
//! - [`BackendOutcome`]: raw backend result, turned into a
//!   [`crate::domain::Solution`] by the application service

use crate::domain::{SolveStatus, WaterFillingProblem};
use crate::error::Result;

/// Backend able to solve the water-filling program.
///
/// Implementations wrap specific solvers (Clarabel, HiGHS, ...) and build
/// their own internal variables for each call. They keep no state between
/// calls.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Implementation Notes
///
/// - Report infeasible or unbounded programs through
///   [`BackendOutcome::status`], not as `Err`
/// - Reserve `Err` for failures that prevent the backend from running at all
pub trait ConvexSolver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Solve the program.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be set up or run.
    fn solve(&self, problem: &WaterFillingProblem) -> Result<BackendOutcome>;
}

/// Raw result of a backend run.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendOutcome {
    /// Terminal status.
    pub status: SolveStatus,

    /// Per-channel allocation, one value per channel.
    ///
    /// Only meaningful when `status` is optimal.
    pub values: Vec<f64>,

    /// Interior-point iterations or cutting-plane rounds performed.
    pub iterations: usize,

    /// Backend-specific detail for non-optimal outcomes.
    pub detail: Option<String>,
}

impl BackendOutcome {
    #[must_use]
    pub fn optimal(values: Vec<f64>, iterations: usize) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
            iterations,
            detail: None,
        }
    }

    #[must_use]
    pub fn failed(status: SolveStatus, iterations: usize, detail: impl Into<String>) -> Self {
        Self {
            status,
            values: Vec::new(),
            iterations,
            detail: Some(detail.into()),
        }
    }
}

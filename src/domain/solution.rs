//! Solver outcomes.
//!
//! A solve either produces an [`OptimalSolution`] or a [`FailedSolve`] that
//! carries the terminal status. Numeric outputs only exist on the optimal
//! branch, so callers cannot read an objective from a failed solve by
//! accident.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::allocation::Allocation;

/// Terminal status reported by a solver backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// A globally optimal point was found.
    Optimal,
    /// No allocation satisfies the constraints.
    Infeasible,
    /// The objective is unbounded over the feasible set.
    Unbounded,
    /// The backend stopped at its iteration or time limit.
    IterationLimit,
    /// The backend failed numerically.
    NumericalError,
    /// The backend cannot represent this problem.
    Unsupported,
}

impl SolveStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
            Self::IterationLimit => "iteration_limit",
            Self::NumericalError => "numerical_error",
            Self::Unsupported => "unsupported",
        }
    }

    #[must_use]
    pub fn is_optimal(self) -> bool {
        self == Self::Optimal
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric result of an optimal solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalSolution {
    /// `sum_i log(alpha_i + x_i)` evaluated at the returned allocation.
    pub objective: f64,
    /// Optimal power per channel.
    pub allocation: Allocation,
    /// Shared `alpha_i + x_i` over channels with positive power.
    pub water_level: Option<f64>,
    /// Backend iterations (interior-point steps or cutting-plane rounds).
    pub iterations: usize,
    /// Name of the backend that produced the solution.
    pub backend: &'static str,
}

/// A solve that did not reach optimality.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{backend} finished with status {status}")]
pub struct FailedSolve {
    /// Terminal status, never [`SolveStatus::Optimal`].
    pub status: SolveStatus,
    pub backend: &'static str,
    /// Backend-specific detail, if any.
    pub reason: Option<String>,
}

/// Outcome of a water-filling solve.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    Optimal(OptimalSolution),
    Failed(FailedSolve),
}

impl Solution {
    #[must_use]
    pub fn status(&self) -> SolveStatus {
        match self {
            Self::Optimal(_) => SolveStatus::Optimal,
            Self::Failed(failed) => failed.status,
        }
    }

    #[must_use]
    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal(_))
    }

    /// Optimal objective value, `None` unless the solve was optimal.
    #[must_use]
    pub fn objective(&self) -> Option<f64> {
        match self {
            Self::Optimal(solution) => Some(solution.objective),
            Self::Failed(_) => None,
        }
    }

    /// Optimal allocation, `None` unless the solve was optimal.
    #[must_use]
    pub fn allocation(&self) -> Option<&Allocation> {
        match self {
            Self::Optimal(solution) => Some(&solution.allocation),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Optimal(solution) => solution.backend,
            Self::Failed(failed) => failed.backend,
        }
    }

    /// Convert into a `Result`, treating every non-optimal status as an error.
    ///
    /// # Errors
    ///
    /// Returns the [`FailedSolve`] when the status is not optimal.
    pub fn into_result(self) -> Result<OptimalSolution, FailedSolve> {
        match self {
            Self::Optimal(solution) => Ok(solution),
            Self::Failed(failed) => Err(failed),
        }
    }
}

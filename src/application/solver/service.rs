//! The water-filling use case.
//!
//! [`WaterFillingSolver`] validates inputs, hands the convex program to a
//! [`ConvexSolver`] backend and turns the backend's raw outcome into a
//! [`Solution`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    verify_water_filling, Allocation, ChannelSet, FailedSolve, OptimalSolution, PowerBudget,
    Solution, WaterFillingProblem,
};
use crate::error::{Result, SolverError};
use crate::port::outbound::solver::ConvexSolver;

/// Channels with more power than this count as active when computing the
/// water level.
pub const ACTIVE_TOLERANCE: f64 = 1e-6;

/// Solves water-filling programs with a pluggable backend.
#[derive(Clone)]
pub struct WaterFillingSolver {
    backend: Arc<dyn ConvexSolver>,
}

impl WaterFillingSolver {
    #[must_use]
    pub fn new(backend: Arc<dyn ConvexSolver>) -> Self {
        Self { backend }
    }

    /// Name of the configured backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Solve `maximize sum log(alpha_i + x_i)` for raw floors and budget.
    ///
    /// # Errors
    ///
    /// Returns a domain error if `alpha` is empty, contains a non-positive
    /// floor, or `total_power` is negative, and a solver error if the
    /// backend cannot run.
    pub fn solve_channels(&self, alpha: &[f64], total_power: f64) -> Result<Solution> {
        self.solve_with_count(alpha.len(), alpha, Some(total_power))
    }

    /// Solve for `n` channels with floors `alpha`.
    ///
    /// A `total_power` of `None` distributes [`PowerBudget::UNIT`].
    ///
    /// # Errors
    ///
    /// Same as [`WaterFillingSolver::solve_channels`], plus
    /// `ChannelCountMismatch` when `n` differs from `alpha.len()`.
    pub fn solve_with_count(
        &self,
        n: usize,
        alpha: &[f64],
        total_power: Option<f64>,
    ) -> Result<Solution> {
        let budget = match total_power {
            Some(value) => PowerBudget::try_new(value)?,
            None => PowerBudget::UNIT,
        };
        let problem = WaterFillingProblem::new(ChannelSet::with_count(n, alpha.to_vec())?, budget);
        self.solve(&problem)
    }

    /// Solve a prepared problem.
    ///
    /// Non-optimal outcomes are returned as [`Solution::Failed`]; `Err` is
    /// reserved for backend failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to run or returns a value vector
    /// of the wrong length.
    pub fn solve(&self, problem: &WaterFillingProblem) -> Result<Solution> {
        let backend = self.backend.name();
        let n = problem.num_channels();
        debug!(
            backend,
            channels = n,
            budget = problem.budget().value(),
            side_constraints = problem.constraints().len(),
            "Solving water-filling program"
        );

        let outcome = self.backend.solve(problem)?;

        if !outcome.status.is_optimal() {
            warn!(
                backend,
                status = %outcome.status,
                detail = outcome.detail.as_deref().unwrap_or(""),
                "Solve did not reach optimality"
            );
            return Ok(Solution::Failed(FailedSolve {
                status: outcome.status,
                backend,
                reason: outcome.detail,
            }));
        }

        if outcome.values.len() != n {
            return Err(SolverError::DimensionMismatch {
                backend,
                expected: n,
                actual: outcome.values.len(),
            }
            .into());
        }

        let allocation = Allocation::from_solver(outcome.values);
        let objective = problem.objective_at(allocation.powers());
        let water_level = allocation.water_level(problem.channels(), ACTIVE_TOLERANCE);

        if !problem.has_side_constraints() {
            let report = verify_water_filling(
                problem.channels(),
                problem.budget(),
                &allocation,
                ACTIVE_TOLERANCE,
            );
            debug!(
                budget_error = report.budget_error,
                level_spread = report.level_spread,
                inactive_violation = report.inactive_violation,
                "Water-filling conditions"
            );
        }

        info!(
            backend,
            objective,
            water_level = water_level.unwrap_or(f64::NAN),
            iterations = outcome.iterations,
            "Solve finished optimal"
        );

        Ok(Solution::Optimal(OptimalSolution {
            objective,
            allocation,
            water_level,
            iterations: outcome.iterations,
            backend,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, SolveStatus};
    use crate::error::Error;
    use crate::port::outbound::solver::BackendOutcome;
    use crate::adapter::outbound::solver::WaterLevelSolver;
    use crate::testkit::solver::ScriptedSolver;

    fn solver_returning(outcome: BackendOutcome) -> WaterFillingSolver {
        WaterFillingSolver::new(Arc::new(ScriptedSolver::new(outcome)))
    }

    #[test]
    fn test_optimal_outcome_is_evaluated() {
        let solver = solver_returning(BackendOutcome::optimal(vec![1.0], 7));

        let solution = solver.solve_channels(&[1.0], 1.0).unwrap();

        let optimal = solution.into_result().unwrap();
        assert!((optimal.objective - 2.0_f64.ln()).abs() < 1e-12);
        assert_eq!(optimal.water_level, Some(2.0));
        assert_eq!(optimal.iterations, 7);
        assert_eq!(optimal.backend, "scripted");
    }

    #[test]
    fn test_failed_outcome_carries_status() {
        let solver = solver_returning(BackendOutcome::failed(
            SolveStatus::Unbounded,
            3,
            "dual infeasible",
        ));

        let solution = solver.solve_channels(&[1.0, 2.0], 1.0).unwrap();

        assert_eq!(solution.status(), SolveStatus::Unbounded);
        assert_eq!(solution.objective(), None);
        match solution {
            Solution::Failed(failed) => {
                assert_eq!(failed.reason.as_deref(), Some("dual infeasible"));
            }
            Solution::Optimal(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_wrong_value_count_is_an_error() {
        let solver = solver_returning(BackendOutcome::optimal(vec![0.5], 1));

        let result = solver.solve_channels(&[1.0, 1.0], 1.0);

        assert!(matches!(
            result,
            Err(Error::Solver(SolverError::DimensionMismatch {
                expected: 2,
                actual: 1,
                ..
            }))
        ));
    }

    #[test]
    fn test_validation_runs_before_backend() {
        let backend = Arc::new(ScriptedSolver::new(BackendOutcome::optimal(vec![], 0)));
        let solver = WaterFillingSolver::new(backend.clone());

        assert!(matches!(
            solver.solve_channels(&[], 1.0),
            Err(Error::Domain(DomainError::EmptyChannels))
        ));
        assert!(matches!(
            solver.solve_channels(&[1.0], -1.0),
            Err(Error::Domain(DomainError::InvalidBudget { .. }))
        ));
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_count_must_match_floors() {
        let backend = Arc::new(ScriptedSolver::new(BackendOutcome::optimal(vec![], 0)));
        let solver = WaterFillingSolver::new(backend.clone());

        let result = solver.solve_with_count(3, &[1.0, 2.0], Some(1.0));

        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::ChannelCountMismatch {
                expected: 3,
                actual: 2
            }))
        ));
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_missing_budget_defaults_to_unit() {
        let solver = WaterFillingSolver::new(Arc::new(WaterLevelSolver::new()));

        let optimal = solver
            .solve_with_count(2, &[1.0, 1.0], None)
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(optimal.allocation.powers(), &[0.5, 0.5]);
        assert_eq!(optimal.allocation.total(), 1.0);
    }
}

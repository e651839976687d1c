//! Closed-form water-filling reference backend.
//!
//! Solves the base program directly from its KKT conditions: every active
//! channel is filled to a shared level `nu = (P + sum_active alpha_i) / |active|`.
//! Channels whose floor sits above the level would need negative power, so
//! they are dropped and the level is recomputed until no channel is negative.
//!
//! Side constraints change the KKT system, so problems carrying any are
//! reported as [`SolveStatus::Unsupported`].

use tracing::debug;

use crate::domain::{SolveStatus, WaterFillingProblem};
use crate::error::Result;
use crate::port::outbound::solver::{BackendOutcome, ConvexSolver};

/// Active-set water-filling solver.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaterLevelSolver;

impl WaterLevelSolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConvexSolver for WaterLevelSolver {
    fn name(&self) -> &'static str {
        "water_level"
    }

    fn solve(&self, problem: &WaterFillingProblem) -> Result<BackendOutcome> {
        if problem.has_side_constraints() {
            return Ok(BackendOutcome::failed(
                SolveStatus::Unsupported,
                0,
                "water-level solver only handles the budget constraint",
            ));
        }

        let (powers, passes) = fill(problem.channels().floors(), problem.budget().value());
        debug!(passes, "Water level settled");
        Ok(BackendOutcome::optimal(powers, passes))
    }
}

/// Returns the allocation and the number of active-set passes.
fn fill(floors: &[f64], budget: f64) -> (Vec<f64>, usize) {
    let n = floors.len();
    // active[i] = true means channel i is still in the allocation set
    let mut active = vec![true; n];
    let mut passes = 0;

    loop {
        passes += 1;
        let active_count = active.iter().filter(|&&a| a).count();
        if active_count == 0 {
            return (vec![0.0; n], passes);
        }

        let floor_sum: f64 = (0..n).filter(|&i| active[i]).map(|i| floors[i]).sum();
        let level = (budget + floor_sum) / active_count as f64;

        let mut powers = vec![0.0; n];
        let mut any_negative = false;
        for i in 0..n {
            if active[i] {
                let p = level - floors[i];
                if p < 0.0 {
                    active[i] = false;
                    any_negative = true;
                } else {
                    powers[i] = p;
                }
            }
        }

        if !any_negative {
            return (powers, passes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Constraint;

    #[test]
    fn test_equal_floors_split_evenly() {
        let (powers, passes) = fill(&[1.0, 1.0, 1.0, 1.0], 2.0);
        assert_eq!(passes, 1);
        for p in powers {
            assert!((p - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_high_floor_is_switched_off() {
        let (powers, passes) = fill(&[0.5, 1.0, 3.0], 1.0);
        assert_eq!(passes, 2);
        assert!((powers[0] - 0.75).abs() < 1e-12);
        assert!((powers[1] - 0.25).abs() < 1e-12);
        assert_eq!(powers[2], 0.0);
    }

    #[test]
    fn test_zero_budget() {
        let (powers, _) = fill(&[1.0, 2.0], 0.0);
        assert_eq!(powers, vec![0.0, 0.0]);
    }

    #[test]
    fn test_side_constraints_unsupported() {
        let problem = WaterFillingProblem::from_floors(vec![1.0, 1.0], 1.0)
            .unwrap()
            .with_constraint(Constraint::leq(vec![1.0, 0.0], 0.1))
            .unwrap();
        let outcome = WaterLevelSolver::new().solve(&problem).unwrap();
        assert_eq!(outcome.status, SolveStatus::Unsupported);
    }
}

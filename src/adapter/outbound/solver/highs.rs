//! HiGHS backend via good_lp.
//!
//! HiGHS only solves linear programs, so the concave objective is replaced by
//! its tangent outer approximation (Kelley's cutting-plane method):
//!
//! ```text
//! maximize    sum_i t_i
//! subject to  t_i <= log(alpha_i + x_hat) + (x_i - x_hat) / (alpha_i + x_hat)
//!                                          for every cut point x_hat of channel i
//!             sum_i x_i = P,  0 <= x_i <= P
//! ```
//!
//! Each round solves the LP, evaluates the true objective at the LP point and
//! adds tangents where the LP overestimates `log`. The LP optimum is an upper
//! bound on the true optimum, so the round stops once the bound and the true
//! objective agree within tolerance.

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use tracing::{debug, trace};

use crate::domain::{ConstraintSense, SolveStatus, WaterFillingProblem};
use crate::error::Result;
use crate::port::outbound::solver::{BackendOutcome, ConvexSolver};

/// Configuration for the cutting-plane loop.
#[derive(Debug, Clone)]
pub struct CuttingPlaneConfig {
    /// Maximum number of LP solves.
    pub max_rounds: usize,
    /// Stop once `LP bound - true objective` is below this value.
    pub tolerance: f64,
}

impl Default for CuttingPlaneConfig {
    fn default() -> Self {
        Self {
            max_rounds: 200,
            tolerance: 1e-8,
        }
    }
}

/// Cuts closer than this to an existing one on the same channel add nothing.
const DUPLICATE_CUT: f64 = 1e-10;

/// Tangent of `log(alpha + x)` at `x_hat`, stored as `t <= slope * x + intercept`.
#[derive(Debug, Clone, Copy)]
struct TangentCut {
    channel: usize,
    x_hat: f64,
    slope: f64,
    intercept: f64,
}

impl TangentCut {
    fn at(channel: usize, alpha: f64, x_hat: f64) -> Self {
        let level = alpha + x_hat;
        let slope = 1.0 / level;
        Self {
            channel,
            x_hat,
            slope,
            intercept: level.ln() - x_hat * slope,
        }
    }
}

/// HiGHS-based cutting-plane solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver {
    config: CuttingPlaneConfig,
}

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    #[must_use]
    pub fn new(config: CuttingPlaneConfig) -> Self {
        Self { config }
    }
}

impl ConvexSolver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &WaterFillingProblem) -> Result<BackendOutcome> {
        let floors = problem.channels().floors();
        let budget = problem.budget().value();

        let mut cuts: Vec<TangentCut> = Vec::new();
        for (i, &alpha) in floors.iter().enumerate() {
            cuts.push(TangentCut::at(i, alpha, 0.0));
            if !problem.budget().is_zero() {
                cuts.push(TangentCut::at(i, alpha, budget));
            }
        }

        for round in 1..=self.config.max_rounds {
            let (x, t) = match solve_relaxation(problem, &cuts) {
                Ok(point) => point,
                Err(err) => {
                    let status = map_error(&err);
                    debug!(round, %status, error = %err, "LP relaxation did not solve");
                    return Ok(BackendOutcome::failed(status, round, err.to_string()));
                }
            };

            let x: Vec<f64> = x.into_iter().map(|v| v.max(0.0)).collect();
            let bound: f64 = t.iter().sum();
            let actual = problem.objective_at(&x);
            let gap = bound - actual;
            trace!(round, bound, actual, gap, cuts = cuts.len(), "Cutting-plane round");

            if gap <= self.config.tolerance {
                debug!(round, gap, "Cutting-plane loop converged");
                return Ok(BackendOutcome::optimal(x, round));
            }

            let before = cuts.len();
            let per_channel = self.config.tolerance / floors.len() as f64;
            for (i, (&alpha, (&xi, &ti))) in floors.iter().zip(x.iter().zip(&t)).enumerate() {
                let known = cuts
                    .iter()
                    .any(|c| c.channel == i && (c.x_hat - xi).abs() <= DUPLICATE_CUT);
                if !known && ti - (alpha + xi).ln() > per_channel {
                    cuts.push(TangentCut::at(i, alpha, xi));
                }
            }
            if cuts.len() == before {
                // Remaining gap is below LP precision.
                debug!(round, gap, "No new cuts to add");
                return Ok(BackendOutcome::optimal(x, round));
            }
        }

        Ok(BackendOutcome::failed(
            SolveStatus::IterationLimit,
            self.config.max_rounds,
            format!(
                "cutting-plane loop did not converge in {} rounds",
                self.config.max_rounds
            ),
        ))
    }
}

/// Solve one LP relaxation, returning `(x, t)`.
fn solve_relaxation(
    problem: &WaterFillingProblem,
    cuts: &[TangentCut],
) -> std::result::Result<(Vec<f64>, Vec<f64>), ResolutionError> {
    let n = problem.num_channels();
    let budget = problem.budget().value();

    let mut vars = variables!();
    let xs: Vec<Variable> = (0..n)
        .map(|_| vars.add(variable().min(0.0).max(budget)))
        .collect();
    let ts: Vec<Variable> = (0..n).map(|_| vars.add(variable())).collect();

    let objective: Expression = ts.iter().map(|&t| Expression::from(t)).sum();
    let mut model = vars.maximise(&objective).using(highs);

    let total: Expression = xs.iter().map(|&x| Expression::from(x)).sum();
    model = model.with(constraint!(total == budget));

    for cut in cuts {
        let lhs = Expression::from(ts[cut.channel]) - cut.slope * xs[cut.channel];
        let rhs = cut.intercept;
        model = model.with(constraint!(lhs <= rhs));
    }

    for constr in problem.constraints() {
        let lhs: Expression = xs
            .iter()
            .zip(constr.coefficients.iter())
            .map(|(&x, &c)| c * x)
            .sum();
        let rhs = constr.rhs;

        match constr.sense {
            ConstraintSense::GreaterEqual => {
                model = model.with(constraint!(lhs >= rhs));
            }
            ConstraintSense::LessEqual => {
                model = model.with(constraint!(lhs <= rhs));
            }
            ConstraintSense::Equal => {
                model = model.with(constraint!(lhs == rhs));
            }
        }
    }

    let solution = model.solve()?;
    let x = xs.iter().map(|&v| solution.value(v)).collect();
    let t = ts.iter().map(|&v| solution.value(v)).collect();
    Ok((x, t))
}

fn map_error(err: &ResolutionError) -> SolveStatus {
    match err {
        ResolutionError::Infeasible => SolveStatus::Infeasible,
        ResolutionError::Unbounded => SolveStatus::Unbounded,
        _ => SolveStatus::NumericalError,
    }
}

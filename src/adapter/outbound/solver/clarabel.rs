//! Clarabel interior-point backend.
//!
//! The concave objective is encoded exactly with exponential cones. With
//! epigraph variables `t_i`:
//!
//! ```text
//! minimize    -sum_i t_i
//! subject to  sum_i x_i = P                      (zero cone)
//!             x_i >= 0                           (nonnegative cone)
//!             (t_i, 1, alpha_i + x_i) in K_exp   (one cone per channel)
//! ```
//!
//! `(t, 1, z) in K_exp` reads `exp(t) <= z`, i.e. `t <= log(z)`.
//!
//! Clarabel expects constraints as `s = b - A v`, `s in K`, with the variable
//! vector laid out as `v = [x_1..x_n, t_1..t_n]`.

#![allow(non_snake_case)]

use ::clarabel::algebra::*;
use ::clarabel::solver::*;
use tracing::debug;

use crate::domain::{ConstraintSense, SolveStatus, WaterFillingProblem};
use crate::error::{Result, SolverError};
use crate::port::outbound::solver::{BackendOutcome, ConvexSolver};

/// Settings forwarded to Clarabel.
#[derive(Debug, Clone)]
pub struct ClarabelConfig {
    /// Maximum interior-point iterations.
    pub max_iterations: u32,
    /// Absolute and relative duality gap tolerance.
    pub tolerance: f64,
    /// Print Clarabel's iteration log to stdout.
    pub verbose: bool,
}

impl Default for ClarabelConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-8,
            verbose: false,
        }
    }
}

/// Exponential-cone formulation solved by Clarabel.
#[derive(Debug, Default, Clone)]
pub struct ClarabelSolver {
    config: ClarabelConfig,
}

impl ClarabelSolver {
    #[must_use]
    pub fn new(config: ClarabelConfig) -> Self {
        Self { config }
    }
}

impl ConvexSolver for ClarabelSolver {
    fn name(&self) -> &'static str {
        "clarabel"
    }

    fn solve(&self, problem: &WaterFillingProblem) -> Result<BackendOutcome> {
        let n = problem.num_channels();
        let program = ConicProgram::build(problem);
        debug!(
            rows = program.b.len(),
            cols = 2 * n,
            cones = program.cones.len(),
            "Built exponential cone program"
        );

        let P = CscMatrix::<f64>::zeros((2 * n, 2 * n));
        let mut q = vec![0.0; n];
        q.extend(std::iter::repeat(-1.0).take(n));

        let settings = DefaultSettings {
            verbose: self.config.verbose,
            max_iter: self.config.max_iterations,
            tol_gap_abs: self.config.tolerance,
            tol_gap_rel: self.config.tolerance,
            tol_feas: self.config.tolerance,
            ..DefaultSettings::default()
        };

        let mut solver =
            DefaultSolver::new(&P, &q, &program.A, &program.b, &program.cones, settings);
        solver.solve();

        let solution = &solver.solution;
        let iterations = solution.iterations as usize;
        let status = map_status(solution.status);

        if status.is_optimal() {
            let values = solution.x.get(..n).ok_or_else(|| SolverError::Backend {
                backend: "clarabel",
                reason: format!("solution has {} entries, expected {}", solution.x.len(), 2 * n),
            })?;
            Ok(BackendOutcome::optimal(values.to_vec(), iterations))
        } else {
            Ok(BackendOutcome::failed(
                status,
                iterations,
                format!("clarabel status {:?}", solution.status),
            ))
        }
    }
}

fn map_status(status: SolverStatus) -> SolveStatus {
    match status {
        SolverStatus::Solved | SolverStatus::AlmostSolved => SolveStatus::Optimal,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            SolveStatus::Infeasible
        }
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
            SolveStatus::Unbounded
        }
        SolverStatus::MaxIterations | SolverStatus::MaxTime => SolveStatus::IterationLimit,
        _ => SolveStatus::NumericalError,
    }
}

/// Constraint data `(A, b, cones)` in Clarabel's `s = b - A v` form.
struct ConicProgram {
    A: CscMatrix<f64>,
    b: Vec<f64>,
    cones: Vec<SupportedConeT<f64>>,
}

impl ConicProgram {
    fn build(problem: &WaterFillingProblem) -> Self {
        let n = problem.num_channels();
        let floors = problem.channels().floors();
        let mut triplets = Triplets::default();
        let mut b = Vec::new();

        // Zero cone: budget plus equality side constraints.
        let mut zero_rows = 0;
        for i in 0..n {
            triplets.push(b.len(), i, 1.0);
        }
        b.push(problem.budget().value());
        zero_rows += 1;
        for constraint in problem.constraints() {
            if constraint.sense == ConstraintSense::Equal {
                for (i, &c) in constraint.coefficients.iter().enumerate() {
                    triplets.push(b.len(), i, c);
                }
                b.push(constraint.rhs);
                zero_rows += 1;
            }
        }

        // Nonnegative cone: x_i >= 0 plus inequality side constraints.
        let mut nonneg_rows = 0;
        for i in 0..n {
            triplets.push(b.len(), i, -1.0);
            b.push(0.0);
            nonneg_rows += 1;
        }
        for constraint in problem.constraints() {
            let sign = match constraint.sense {
                ConstraintSense::LessEqual => 1.0,
                ConstraintSense::GreaterEqual => -1.0,
                ConstraintSense::Equal => continue,
            };
            for (i, &c) in constraint.coefficients.iter().enumerate() {
                triplets.push(b.len(), i, sign * c);
            }
            b.push(sign * constraint.rhs);
            nonneg_rows += 1;
        }

        // One exponential cone per channel: (t_i, 1, alpha_i + x_i).
        for (i, &alpha) in floors.iter().enumerate() {
            triplets.push(b.len(), n + i, -1.0);
            b.push(0.0);
            b.push(1.0);
            triplets.push(b.len(), i, -1.0);
            b.push(alpha);
        }

        let mut cones = vec![
            SupportedConeT::ZeroConeT(zero_rows),
            SupportedConeT::NonnegativeConeT(nonneg_rows),
        ];
        cones.extend((0..n).map(|_| SupportedConeT::ExponentialConeT()));

        let Triplets { I, J, V } = triplets;
        Self {
            A: CscMatrix::new_from_triplets(b.len(), 2 * n, I, J, V),
            b,
            cones,
        }
    }
}

/// Nonzero `(row, col, value)` entries of `A`.
#[derive(Default)]
struct Triplets {
    I: Vec<usize>,
    J: Vec<usize>,
    V: Vec<f64>,
}

impl Triplets {
    fn push(&mut self, row: usize, col: usize, value: f64) {
        if value != 0.0 {
            self.I.push(row);
            self.J.push(col);
            self.V.push(value);
        }
    }
}

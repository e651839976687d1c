//! Waterfill - water-filling power allocation via external solvers.
//!
//! Maximizes `sum_i log(alpha_i + x_i)` over allocations `x >= 0` with
//! `sum_i x_i = P`. The program is handed to a mature solver backend; the
//! crate only formulates it, validates inputs and interprets the result.
//!
//! # Architecture
//!
//! - **`domain`** - Channels, budget, constraints, allocations, solutions
//! - **`port`** - The [`port::ConvexSolver`] backend trait
//! - **`adapter::outbound::solver`** - Backends
//!   - `ClarabelSolver` - Exponential-cone formulation on Clarabel
//!   - `HiGHSSolver` - Tangent cutting planes on HiGHS via good_lp
//!   - `WaterLevelSolver` - Closed-form reference
//! - **`application`** - The [`application::solver::WaterFillingSolver`] use case
//! - **`infrastructure`** - Configuration, logging and backend factory
//! - **`adapter::inbound::cli`** - The `waterfill` command line
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use waterfill::adapter::outbound::solver::ClarabelSolver;
//! use waterfill::application::solver::WaterFillingSolver;
//!
//! let solver = WaterFillingSolver::new(Arc::new(ClarabelSolver::default()));
//! let solution = solver.solve_channels(&[0.8, 1.0, 1.2], 1.0)?;
//! if let Some(objective) = solution.objective() {
//!     println!("optimal value {objective:.3}");
//! }
//! # Ok::<(), waterfill::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

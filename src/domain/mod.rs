//! Solver-agnostic domain types for water-filling power allocation.

pub mod allocation;
pub mod channel;
pub mod constraint;
pub mod error;
pub mod problem;
pub mod solution;
pub mod verify;

pub use allocation::Allocation;
pub use channel::{ChannelSet, PowerBudget};
pub use constraint::{Constraint, ConstraintSense};
pub use error::DomainError;
pub use problem::WaterFillingProblem;
pub use solution::{FailedSolve, OptimalSolution, SolveStatus, Solution};
pub use verify::{verify_water_filling, WaterFillingReport};

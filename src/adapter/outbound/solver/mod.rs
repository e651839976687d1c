//! Solver backends for the water-filling program.
//!
//! Implements the `port::outbound::solver::ConvexSolver` trait with concrete
//! backends.

mod clarabel;
mod highs;
mod water_level;

pub use self::clarabel::{ClarabelConfig, ClarabelSolver};
pub use highs::{CuttingPlaneConfig, HiGHSSolver};
pub use water_level::WaterLevelSolver;

//! Solver factory.
//!
//! Builds the configured [`ConvexSolver`] backend and wraps it in the
//! [`WaterFillingSolver`] use case.

use std::sync::Arc;

use crate::adapter::outbound::solver::{
    ClarabelConfig, ClarabelSolver, CuttingPlaneConfig, HiGHSSolver, WaterLevelSolver,
};
use crate::application::solver::WaterFillingSolver;
use crate::infrastructure::config::solver::{SolverBackend, SolverConfig};
use crate::port::outbound::solver::ConvexSolver;

/// Build the backend selected by `config.backend`.
pub fn build_backend(config: &SolverConfig) -> Arc<dyn ConvexSolver> {
    match config.backend {
        SolverBackend::Clarabel => Arc::new(ClarabelSolver::new(ClarabelConfig {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            verbose: config.verbose,
        })),
        SolverBackend::Highs => Arc::new(HiGHSSolver::new(CuttingPlaneConfig {
            max_rounds: config.max_iterations as usize,
            tolerance: config.tolerance,
        })),
        SolverBackend::WaterLevel => Arc::new(WaterLevelSolver::new()),
    }
}

/// Build the water-filling use case for the configured backend.
pub fn build_solver(config: &SolverConfig) -> WaterFillingSolver {
    WaterFillingSolver::new(build_backend(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_each_backend() {
        for (backend, name) in [
            (SolverBackend::Clarabel, "clarabel"),
            (SolverBackend::Highs, "highs"),
            (SolverBackend::WaterLevel, "water_level"),
        ] {
            let config = SolverConfig {
                backend,
                ..SolverConfig::default()
            };
            assert_eq!(build_solver(&config).backend_name(), name);
            assert_eq!(backend.as_str(), name);
        }
    }
}

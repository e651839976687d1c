#![allow(dead_code)]

use std::sync::Arc;

use waterfill::adapter::outbound::solver::{ClarabelSolver, HiGHSSolver, WaterLevelSolver};
use waterfill::application::solver::WaterFillingSolver;
use waterfill::port::ConvexSolver;

/// Every backend shipped with the crate, paired with the accuracy it is
/// expected to reach on small problems.
pub fn backends() -> Vec<(Arc<dyn ConvexSolver>, f64)> {
    vec![
        (Arc::new(ClarabelSolver::default()), 1e-5),
        (Arc::new(HiGHSSolver::default()), 1e-3),
        (Arc::new(WaterLevelSolver::new()), 1e-9),
    ]
}

pub fn solver(backend: Arc<dyn ConvexSolver>) -> WaterFillingSolver {
    WaterFillingSolver::new(backend)
}

//! Solver backend configuration.

use serde::{Deserialize, Serialize};

/// Available solver backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Clarabel interior-point solver with exponential cones.
    #[default]
    Clarabel,
    /// HiGHS LP solver with tangent cutting planes.
    Highs,
    /// Closed-form water level (budget constraint only).
    WaterLevel,
}

impl SolverBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clarabel => "clarabel",
            Self::Highs => "highs",
            Self::WaterLevel => "water_level",
        }
    }
}

/// Solver settings from the `[solver]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Backend used when the CLI does not override it.
    pub backend: SolverBackend,

    /// Convergence tolerance.
    ///
    /// Duality gap and feasibility tolerance for Clarabel; bound gap for the
    /// HiGHS cutting-plane loop.
    pub tolerance: f64,

    /// Interior-point iterations (Clarabel) or LP rounds (HiGHS).
    pub max_iterations: u32,

    /// Let the backend print its own iteration log.
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::default(),
            tolerance: 1e-8,
            max_iterations: 200,
            verbose: false,
        }
    }
}

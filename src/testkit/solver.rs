//! Scripted solver backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::WaterFillingProblem;
use crate::error::Result;
use crate::port::{BackendOutcome, ConvexSolver};

/// Backend that returns a fixed outcome and counts how often it was asked.
#[derive(Debug)]
pub struct ScriptedSolver {
    outcome: BackendOutcome,
    calls: AtomicUsize,
}

impl ScriptedSolver {
    #[must_use]
    pub fn new(outcome: BackendOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `solve` calls seen so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ConvexSolver for ScriptedSolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, _problem: &WaterFillingProblem) -> Result<BackendOutcome> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.outcome.clone())
    }
}

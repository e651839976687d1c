//! Canonical problems used across tests.
//!
//! Each fixture pairs a problem with its closed-form optimum so tests can
//! compare backend output against a known answer.

use crate::domain::{Allocation, WaterFillingProblem};

/// Floors of the three-channel reference problem.
pub const CLASSIC_FLOORS: [f64; 3] = [0.8, 1.0, 1.2];

/// Optimal allocation of the reference problem with `P = 1`.
pub const CLASSIC_POWERS: [f64; 3] = [8.0 / 15.0, 1.0 / 3.0, 2.0 / 15.0];

/// Water level of the reference problem with `P = 1`.
pub const CLASSIC_LEVEL: f64 = 4.0 / 3.0;

/// Optimal value of the reference problem: `3 ln(4/3)`.
#[must_use]
pub fn classic_objective() -> f64 {
    3.0 * CLASSIC_LEVEL.ln()
}

/// The reference problem: floors `(0.8, 1.0, 1.2)`, unit budget.
#[must_use]
pub fn classic_problem() -> WaterFillingProblem {
    problem(&CLASSIC_FLOORS, 1.0)
}

/// Problem where the highest floor stays dry: floors `(0.1, 0.2, 5.0)`,
/// `P = 1` gives level `0.65` and no power on channel 2.
#[must_use]
pub fn dry_channel_problem() -> WaterFillingProblem {
    problem(&[0.1, 0.2, 5.0], 1.0)
}

/// Build a problem, panicking on invalid input.
#[must_use]
pub fn problem(floors: &[f64], total_power: f64) -> WaterFillingProblem {
    WaterFillingProblem::from_floors(floors.to_vec(), total_power)
        .unwrap_or_else(|err| panic!("invalid fixture {floors:?}/{total_power}: {err}"))
}

/// Assert two floats agree within `tolerance`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// Assert an allocation matches `expected` component-wise within `tolerance`.
#[track_caller]
pub fn assert_allocation_close(actual: &Allocation, expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "allocation length");
    for (i, (a, e)) in actual.powers().iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "channel {i}: expected {e}, got {a} (tolerance {tolerance})"
        );
    }
}

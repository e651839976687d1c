//! Optimality checks for a water-filling allocation.
//!
//! At the optimum of the base program, KKT stationarity gives
//! `1 / (alpha_i + x_i) = lambda` on every channel with `x_i > 0`, so all
//! active channels share one water level `nu = 1 / lambda`. A channel with
//! `x_k = 0` has `1 / alpha_k <= lambda`, i.e. its floor is at or above `nu`.

use serde::Serialize;

use super::allocation::Allocation;
use super::channel::{ChannelSet, PowerBudget};

/// Measured deviations of an allocation from the water-filling conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterFillingReport {
    /// `|sum x_i - P|`.
    pub budget_error: f64,
    /// Smallest allocated power.
    pub min_allocation: f64,
    /// Mean level over active channels, `None` when nothing is active.
    pub water_level: Option<f64>,
    /// `max - min` of `alpha_i + x_i` over active channels.
    pub level_spread: f64,
    /// Largest `nu - alpha_k` over inactive channels, clamped at zero.
    pub inactive_violation: f64,
}

impl WaterFillingReport {
    /// Whether every measured deviation is within `tolerance`.
    #[must_use]
    pub fn holds(&self, tolerance: f64) -> bool {
        self.budget_error <= tolerance
            && self.min_allocation >= -tolerance
            && self.level_spread <= tolerance
            && self.inactive_violation <= tolerance
    }
}

/// Measure how closely `allocation` satisfies the water-filling conditions.
///
/// Channels with power above `active_tolerance` count as active.
#[must_use]
pub fn verify_water_filling(
    channels: &ChannelSet,
    budget: PowerBudget,
    allocation: &Allocation,
    active_tolerance: f64,
) -> WaterFillingReport {
    let powers = allocation.powers();
    let floors = channels.floors();
    let levels = allocation.levels(channels);
    let active = allocation.active(active_tolerance);

    let budget_error = (allocation.total() - budget.value()).abs();
    let min_allocation = powers.iter().copied().fold(f64::INFINITY, f64::min);
    let water_level = allocation.water_level(channels, active_tolerance);

    let (lo, hi) = active
        .iter()
        .map(|&i| levels[i])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), l| {
            (lo.min(l), hi.max(l))
        });
    let level_spread = if active.is_empty() { 0.0 } else { hi - lo };

    let inactive_violation = match water_level {
        Some(nu) => powers
            .iter()
            .zip(floors)
            .filter(|(x, _)| **x <= active_tolerance)
            .map(|(_, a)| (nu - a).max(0.0))
            .fold(0.0, f64::max),
        None => 0.0,
    };

    WaterFillingReport {
        budget_error,
        min_allocation,
        water_level,
        level_spread,
        inactive_violation,
    }
}

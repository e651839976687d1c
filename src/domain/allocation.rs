//! Per-channel power allocation.

use serde::Serialize;

use super::channel::ChannelSet;

/// Power assigned to each channel, in channel order.
///
/// Built once from solver output and immutable afterwards. Small negative
/// values produced by solver round-off are clamped to zero on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Allocation {
    powers: Vec<f64>,
}

impl Allocation {
    /// Wrap raw solver values, clamping negatives to zero.
    #[must_use]
    pub fn from_solver(values: Vec<f64>) -> Self {
        let powers = values.into_iter().map(|x| x.max(0.0)).collect();
        Self { powers }
    }

    /// All-zero allocation for `n` channels.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            powers: vec![0.0; n],
        }
    }

    #[must_use]
    pub fn powers(&self) -> &[f64] {
        &self.powers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Total allocated power.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.powers.iter().sum()
    }

    /// Water height `alpha_i + x_i` of each channel.
    #[must_use]
    pub fn levels(&self, channels: &ChannelSet) -> Vec<f64> {
        channels
            .floors()
            .iter()
            .zip(&self.powers)
            .map(|(a, x)| a + x)
            .collect()
    }

    /// Indices of channels that received more than `tolerance` power.
    #[must_use]
    pub fn active(&self, tolerance: f64) -> Vec<usize> {
        self.powers
            .iter()
            .enumerate()
            .filter(|(_, x)| **x > tolerance)
            .map(|(i, _)| i)
            .collect()
    }

    /// Mean water height over active channels, `None` if nothing is active.
    #[must_use]
    pub fn water_level(&self, channels: &ChannelSet, tolerance: f64) -> Option<f64> {
        let active = self.active(tolerance);
        if active.is_empty() {
            return None;
        }
        let floors = channels.floors();
        let sum: f64 = active.iter().map(|&i| floors[i] + self.powers[i]).sum();
        Some(sum / active.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_round_off() {
        let allocation = Allocation::from_solver(vec![-1e-12, 0.5, 0.5]);
        assert_eq!(allocation.powers(), &[0.0, 0.5, 0.5]);
        assert!((allocation.total() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_water_level_over_active_channels() {
        let channels = ChannelSet::try_new(vec![0.5, 1.0, 2.0]).unwrap();
        let allocation = Allocation::from_solver(vec![1.0, 0.5, 0.0]);
        assert_eq!(allocation.active(1e-9), vec![0, 1]);
        assert_eq!(allocation.levels(&channels), vec![1.5, 1.5, 2.0]);
        assert_eq!(allocation.water_level(&channels, 1e-9), Some(1.5));
    }

    #[test]
    fn test_no_water_level_when_nothing_allocated() {
        let channels = ChannelSet::try_new(vec![1.0, 1.0]).unwrap();
        assert_eq!(Allocation::zeros(2).water_level(&channels, 1e-9), None);
    }
}

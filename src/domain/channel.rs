//! Channel floors and the power budget.

use serde::Serialize;

use super::error::DomainError;

/// Ordered, non-empty set of channel floors `α_i > 0`.
///
/// The floor is the baseline noise/gain level added to allocated power
/// before taking the log-capacity of a channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChannelSet {
    floors: Vec<f64>,
}

impl ChannelSet {
    /// Build a channel set, validating every floor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyChannels`] for an empty vector and
    /// [`DomainError::NonPositiveFloor`] for the first floor that is not
    /// finite and strictly positive.
    pub fn try_new(floors: Vec<f64>) -> Result<Self, DomainError> {
        if floors.is_empty() {
            return Err(DomainError::EmptyChannels);
        }
        if let Some((index, &value)) = floors
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(DomainError::NonPositiveFloor { index, value });
        }
        Ok(Self { floors })
    }

    /// Build a channel set whose length must equal a declared channel count.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ChannelCountMismatch`] when `count` differs from
    /// `floors.len()`, otherwise the errors of [`ChannelSet::try_new`].
    pub fn with_count(count: usize, floors: Vec<f64>) -> Result<Self, DomainError> {
        if count != floors.len() {
            return Err(DomainError::ChannelCountMismatch {
                expected: count,
                actual: floors.len(),
            });
        }
        Self::try_new(floors)
    }

    /// Number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    #[must_use]
    pub fn floors(&self) -> &[f64] {
        &self.floors
    }

    /// Objective value of the zero allocation, `Σ log α_i`.
    #[must_use]
    pub fn baseline_capacity(&self) -> f64 {
        self.floors.iter().map(|a| a.ln()).sum()
    }
}

/// Total power to distribute across channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PowerBudget(f64);

impl PowerBudget {
    /// Unit budget used when the caller does not specify one.
    pub const UNIT: Self = Self(1.0);

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBudget`] for negative or non-finite values.
    pub fn try_new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidBudget { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for PowerBudget {
    fn default() -> Self {
        Self::UNIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_channels() {
        assert_eq!(ChannelSet::try_new(vec![]), Err(DomainError::EmptyChannels));
    }

    #[test]
    fn test_rejects_non_positive_and_nan_floors() {
        assert!(matches!(
            ChannelSet::try_new(vec![1.0, -0.5]),
            Err(DomainError::NonPositiveFloor { index: 1, .. })
        ));
        assert!(matches!(
            ChannelSet::try_new(vec![f64::NAN]),
            Err(DomainError::NonPositiveFloor { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_count_mismatch() {
        assert_eq!(
            ChannelSet::with_count(2, vec![1.0, 2.0, 3.0]),
            Err(DomainError::ChannelCountMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_baseline_capacity_sums_logs() {
        let channels = ChannelSet::try_new(vec![1.0, std::f64::consts::E]).unwrap();
        assert!((channels.baseline_capacity() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_budget_validation() {
        assert!(PowerBudget::try_new(0.0).unwrap().is_zero());
        assert!(!PowerBudget::UNIT.is_zero());
        assert!(PowerBudget::try_new(-1e-3).is_err());
        assert!(PowerBudget::try_new(f64::INFINITY).is_err());
        assert_eq!(PowerBudget::default().value(), 1.0);
    }
}

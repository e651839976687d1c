//! The water-filling convex program.
//!
//! ```text
//! maximize    sum_i log(alpha_i + x_i)
//! subject to  x_i >= 0
//!             sum_i x_i = P
//!             side constraints
//! ```

use super::channel::{ChannelSet, PowerBudget};
use super::constraint::Constraint;
use super::error::DomainError;

/// A validated water-filling program ready to hand to a solver backend.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterFillingProblem {
    channels: ChannelSet,
    budget: PowerBudget,
    constraints: Vec<Constraint>,
}

impl WaterFillingProblem {
    #[must_use]
    pub fn new(channels: ChannelSet, budget: PowerBudget) -> Self {
        Self {
            channels,
            budget,
            constraints: Vec::new(),
        }
    }

    /// Build a problem from raw floors and a raw budget.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`ChannelSet::try_new`] and
    /// [`PowerBudget::try_new`].
    pub fn from_floors(floors: Vec<f64>, total_power: f64) -> Result<Self, DomainError> {
        Ok(Self::new(
            ChannelSet::try_new(floors)?,
            PowerBudget::try_new(total_power)?,
        ))
    }

    /// Add a side constraint.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ConstraintDimension`] if the coefficient vector
    /// length differs from the channel count, or
    /// [`DomainError::NonFiniteConstraint`] for NaN/infinite entries.
    pub fn with_constraint(mut self, constraint: Constraint) -> Result<Self, DomainError> {
        if constraint.coefficients.len() != self.channels.len() {
            return Err(DomainError::ConstraintDimension {
                expected: self.channels.len(),
                actual: constraint.coefficients.len(),
            });
        }
        if !constraint.rhs.is_finite() || constraint.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(DomainError::NonFiniteConstraint);
        }
        self.constraints.push(constraint);
        Ok(self)
    }

    #[must_use]
    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    #[must_use]
    pub fn budget(&self) -> PowerBudget {
        self.budget
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of decision variables (one per channel).
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn has_side_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    /// Evaluate `sum_i log(alpha_i + x_i)` at `values`.
    #[must_use]
    pub fn objective_at(&self, values: &[f64]) -> f64 {
        self.channels
            .floors()
            .iter()
            .zip(values)
            .map(|(a, x)| (a + x).ln())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_misdimensioned_constraint() {
        let problem = WaterFillingProblem::from_floors(vec![1.0, 2.0], 1.0).unwrap();
        let result = problem.with_constraint(Constraint::total_equals(3, 1.0));
        assert_eq!(
            result,
            Err(DomainError::ConstraintDimension {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_rejects_non_finite_constraint() {
        let problem = WaterFillingProblem::from_floors(vec![1.0], 1.0).unwrap();
        let result = problem.with_constraint(Constraint::eq(vec![f64::NAN], 1.0));
        assert_eq!(result, Err(DomainError::NonFiniteConstraint));
    }

    #[test]
    fn test_objective_at_zero_is_baseline() {
        let problem = WaterFillingProblem::from_floors(vec![0.8, 1.0, 1.2], 1.0).unwrap();
        let expected = problem.channels().baseline_capacity();
        assert!((problem.objective_at(&[0.0, 0.0, 0.0]) - expected).abs() < 1e-12);
    }
}

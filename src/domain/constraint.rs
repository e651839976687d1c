//! Linear side constraints over a power allocation.
//!
//! The base water-filling program only has the budget equality and
//! non-negativity. Side constraints restrict it further, for example capping
//! a group of channels or probing infeasibility.

use serde::{Deserialize, Serialize};

/// A single linear constraint: `sum(coefficients[i] * x[i]) {>=, <=, =} rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Coefficient for each channel's allocation.
    pub coefficients: Vec<f64>,
    /// Constraint sense (>=, <=, =).
    pub sense: ConstraintSense,
    /// Right-hand side value.
    pub rhs: f64,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub const fn geq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub const fn leq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub const fn eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    /// Constrain the total allocation across `n` channels to equal `rhs`.
    #[must_use]
    pub fn total_equals(n: usize, rhs: f64) -> Self {
        Self::eq(vec![1.0; n], rhs)
    }

    /// Left-hand side evaluated at `values`.
    #[must_use]
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// Whether `values` satisfy the constraint within `tolerance`.
    #[must_use]
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tolerance,
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_equals_sums_every_channel() {
        let c = Constraint::total_equals(3, 1.0);
        assert_eq!(c.coefficients, vec![1.0, 1.0, 1.0]);
        assert!(c.is_satisfied(&[0.5, 0.25, 0.25], 1e-12));
        assert!(!c.is_satisfied(&[0.5, 0.25, 0.0], 1e-12));
    }

    #[test]
    fn test_inequality_senses() {
        let cap = Constraint::leq(vec![1.0, 0.0], 0.2);
        assert!(cap.is_satisfied(&[0.2, 5.0], 1e-12));
        assert!(!cap.is_satisfied(&[0.3, 0.0], 1e-12));

        let floor = Constraint::geq(vec![0.0, 1.0], 0.1);
        assert!(floor.is_satisfied(&[0.0, 0.1], 1e-12));
        assert!(!floor.is_satisfied(&[1.0, 0.0], 1e-12));
    }
}

//! Expected Shortfall (conditional VaR).
//!
//! ES is the mean loss over the returns that breach the VaR threshold.
//! It is undefined when nothing breaches, which is reported as
//! `RiskError::UndefinedShortfall` rather than a NaN.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stats::mean;
use tailrisk_core::{ReturnSeries, RiskError, RiskResult};

/// Expected Shortfall result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ESResult {
    /// Mean loss beyond the VaR threshold (positive = loss).
    pub expected_shortfall: f64,
    /// VaR threshold the tail was taken against.
    pub var: f64,
    /// Number of returns in the tail.
    pub tail_observations: usize,
}

impl fmt::Display for ESResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ES: {:.4} (VaR {:.4}, {} tail obs)",
            self.expected_shortfall, self.var, self.tail_observations
        )
    }
}

/// Computes Expected Shortfall from a return series and a VaR.
///
/// The tail is every return strictly below `-var`; ES is the negated mean of
/// the tail. Whenever it is defined, ES exceeds `var`.
///
/// # Errors
///
/// Returns `RiskError::UndefinedShortfall` when no return lies below `-var`,
/// and `RiskError::InvalidParameter` for a non-finite `var`.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::ReturnSeries;
/// use tailrisk_risk::expected_shortfall;
///
/// let returns = ReturnSeries::new(vec![-0.05, -0.03, -0.01, 0.02]);
/// let es = expected_shortfall(&returns, 0.02).unwrap();
/// assert!((es.expected_shortfall - 0.04).abs() < 1e-12);
/// assert_eq!(es.tail_observations, 2);
/// ```
pub fn expected_shortfall(returns: &ReturnSeries, var: f64) -> RiskResult<ESResult> {
    if !var.is_finite() {
        return Err(RiskError::invalid_parameter(
            "var",
            format!("{var} is not finite"),
        ));
    }

    let tail: Vec<f64> = returns.below(-var).collect();
    if tail.is_empty() {
        return Err(RiskError::undefined_shortfall(var));
    }

    Ok(ESResult {
        expected_shortfall: -mean(&tail),
        var,
        tail_observations: tail.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_threshold_is_strict() {
        // -0.02 sits exactly on the threshold and is excluded
        let returns = ReturnSeries::new(vec![-0.04, -0.02, 0.01]);
        let es = expected_shortfall(&returns, 0.02).unwrap();
        assert_relative_eq!(es.expected_shortfall, 0.04, epsilon = 1e-15);
        assert_eq!(es.tail_observations, 1);
    }

    #[test]
    fn test_no_breach_is_undefined() {
        let returns = ReturnSeries::new(vec![-0.01, 0.0, 0.02]);
        let err = expected_shortfall(&returns, 0.05).unwrap_err();
        assert_eq!(err, RiskError::undefined_shortfall(0.05));
    }

    #[test]
    fn test_empty_series_is_undefined() {
        let err = expected_shortfall(&ReturnSeries::default(), 0.01).unwrap_err();
        assert!(err.is_undefined_shortfall());
    }

    #[test]
    fn test_negative_var_includes_small_gains() {
        // VaR of -0.01 puts the threshold at +0.01
        let returns = ReturnSeries::new(vec![0.005, 0.02, 0.03]);
        let es = expected_shortfall(&returns, -0.01).unwrap();
        assert_relative_eq!(es.expected_shortfall, -0.005, epsilon = 1e-15);
        assert!(es.expected_shortfall > es.var);
    }

    #[test]
    fn test_non_finite_var_rejected() {
        let returns = ReturnSeries::new(vec![-0.01]);
        assert!(matches!(
            expected_shortfall(&returns, f64::NAN),
            Err(RiskError::InvalidParameter { .. })
        ));
    }
}

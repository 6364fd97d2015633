//! VaR backtesting against realized returns.
//!
//! A violation is a realized return strictly below `-var`. The model is
//! flagged when violations outnumber `floor((1 - c) * n)`, the count implied by
//! the confidence level. The Kupiec proportion-of-failures test is reported
//! alongside as a likelihood-ratio measure of the same mismatch.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::fmt;

use crate::returns::compute_returns;
use tailrisk_core::{ConfidenceLevel, PriceSeries, ReturnSeries, RiskError, RiskResult};

/// Kupiec proportion-of-failures test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KupiecTest {
    /// Likelihood-ratio statistic, chi-square with one degree of freedom.
    pub lr_statistic: f64,
    /// p-value of the statistic.
    pub p_value: f64,
}

/// Result of a VaR backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// VaR being tested.
    pub var: f64,
    /// Confidence level of the VaR.
    pub confidence_level: ConfidenceLevel,
    /// Number of realized returns.
    pub total_observations: usize,
    /// Returns strictly below `-var`.
    pub violation_count: usize,
    /// `floor((1 - c) * total_observations)`.
    pub expected_violation_count: usize,
    /// True when `violation_count > expected_violation_count`.
    pub exceeds_expected: bool,
    /// `violation_count / total_observations`.
    pub violation_rate: f64,
    /// Kupiec proportion-of-failures test.
    pub kupiec: KupiecTest,
}

impl BacktestReport {
    /// Human-readable verdict.
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.exceeds_expected {
            "Warning: More losses than expected have exceeded the VaR."
        } else {
            "VaR model performance is within expected bounds."
        }
    }
}

impl fmt::Display for BacktestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} violations in {} observations (expected {} at {})",
            self.violation_count,
            self.total_observations,
            self.expected_violation_count,
            self.confidence_level
        )
    }
}

/// Backtests a VaR against the returns realized by a price series.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` if the series has fewer than two
/// observations.
pub fn backtest(
    prices: &PriceSeries,
    var: f64,
    confidence_level: ConfidenceLevel,
) -> RiskResult<BacktestReport> {
    let returns = compute_returns(prices)?;
    backtest_returns(&returns, var, confidence_level)
}

/// Backtests a VaR against a realized return series.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` for an empty series and
/// `RiskError::InvalidParameter` for a non-finite `var`.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::{ConfidenceLevel, ReturnSeries};
/// use tailrisk_risk::backtest_returns;
///
/// let mut values = vec![0.001; 94];
/// values.extend([-0.05; 6]);
/// let report = backtest_returns(&ReturnSeries::new(values), 0.03, ConfidenceLevel::P95).unwrap();
/// assert_eq!(report.expected_violation_count, 5);
/// assert_eq!(report.violation_count, 6);
/// assert!(report.exceeds_expected);
/// ```
pub fn backtest_returns(
    returns: &ReturnSeries,
    var: f64,
    confidence_level: ConfidenceLevel,
) -> RiskResult<BacktestReport> {
    if returns.is_empty() {
        return Err(RiskError::insufficient_data("backtest", 1, 0));
    }
    if !var.is_finite() {
        return Err(RiskError::invalid_parameter(
            "var",
            format!("{var} is not finite"),
        ));
    }

    let total_observations = returns.len();
    let violation_count = returns.below(-var).count();
    let expected_violation_count =
        (confidence_level.tail_probability() * total_observations as f64).floor() as usize;
    let kupiec = kupiec_test(total_observations, violation_count, confidence_level)?;

    Ok(BacktestReport {
        var,
        confidence_level,
        total_observations,
        violation_count,
        expected_violation_count,
        exceeds_expected: violation_count > expected_violation_count,
        violation_rate: violation_count as f64 / total_observations as f64,
        kupiec,
    })
}

/// Kupiec proportion-of-failures likelihood-ratio test.
///
/// Compares the observed violation frequency `x / n` with the rate `1 - c`
/// implied by the confidence level.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` when `total` is zero and
/// `RiskError::InvalidParameter` when `violations > total`.
pub fn kupiec_test(
    total: usize,
    violations: usize,
    confidence_level: ConfidenceLevel,
) -> RiskResult<KupiecTest> {
    if total == 0 {
        return Err(RiskError::insufficient_data("kupiec_test", 1, 0));
    }
    if violations > total {
        return Err(RiskError::invalid_parameter(
            "violations",
            format!("{violations} exceeds {total} observations"),
        ));
    }

    let n = total as f64;
    let x = violations as f64;
    let p = confidence_level.tail_probability();
    let observed = x / n;

    let ln_null = xlny(n - x, 1.0 - p) + xlny(x, p);
    let ln_alt = xlny(n - x, 1.0 - observed) + xlny(x, observed);
    let lr_statistic = (2.0 * (ln_alt - ln_null)).max(0.0);

    let chi = ChiSquared::new(1.0)
        .map_err(|e| RiskError::calculation_failed("kupiec_test", e.to_string()))?;

    Ok(KupiecTest {
        lr_statistic,
        p_value: 1.0 - chi.cdf(lr_statistic),
    })
}

/// `x * ln(y)`, taken as zero when `x` is zero.
fn xlny(x: f64, y: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x * y.ln()
    }
}

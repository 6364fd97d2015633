//! Value at Risk (VaR) calculations.
//!
//! VaR estimates the loss that is exceeded with probability `1 - c` over one
//! return period at confidence level `c`.
//!
//! Sign convention: VaR is the negated left-tail percentile of the return
//! distribution, so a loss is a positive number. The value is not clamped.
//! When the fitted drift dominates the spread, the left-tail percentile is
//! itself a gain and the VaR comes out negative; see [`VaRResult::is_gain`].

mod monte_carlo;

pub use monte_carlo::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use tailrisk_core::ConfidenceLevel;

/// Normal distribution fitted to a return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalFit {
    /// Sample mean of the returns.
    pub mean: f64,
    /// Population standard deviation of the returns.
    pub std_dev: f64,
}

/// Value at Risk result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// The VaR, as a fraction of position value (0.02 = 2% loss).
    pub var: f64,
    /// Confidence level used.
    pub confidence_level: ConfidenceLevel,
    /// Number of simulated draws.
    pub num_simulations: usize,
    /// Distribution the draws were taken from.
    pub fit: NormalFit,
}

impl VaRResult {
    /// True when the tail quantile is a gain, i.e. the VaR is negative.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.var < 0.0
    }

    /// The return threshold `-var` that a loss must fall below to breach.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        -self.var
    }
}

impl fmt::Display for VaRResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VaR({}, {} sims): {:.4}",
            self.confidence_level, self.num_simulations, self.var
        )
    }
}

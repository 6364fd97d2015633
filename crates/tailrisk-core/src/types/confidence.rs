//! Confidence level type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RiskError, RiskResult};

/// A VaR confidence level in the open interval (0, 1), e.g. 0.95.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::types::ConfidenceLevel;
///
/// let c = ConfidenceLevel::new(0.99).unwrap();
/// assert!((c.tail_probability() - 0.01).abs() < 1e-12);
/// assert!(ConfidenceLevel::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// 95% confidence.
    pub const P95: Self = Self(0.95);

    /// 99% confidence.
    pub const P99: Self = Self(0.99);

    /// Creates a confidence level.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidParameter` unless `0 < value < 1`.
    pub fn new(value: f64) -> RiskResult<Self> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(RiskError::invalid_parameter(
                "confidence_level",
                format!("{value} is outside the open interval (0, 1)"),
            ))
        }
    }

    /// The confidence level as a decimal.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Probability mass of the loss tail, `1 - c`.
    #[must_use]
    pub fn tail_probability(self) -> f64 {
        1.0 - self.0
    }

    /// The confidence level as a percentage (95.0 for 0.95).
    #[must_use]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::P95
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = RiskError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_open() {
        assert!(ConfidenceLevel::new(0.0).is_err());
        assert!(ConfidenceLevel::new(1.0).is_err());
        assert!(ConfidenceLevel::new(-0.5).is_err());
        assert!(ConfidenceLevel::new(f64::NAN).is_err());
        assert!(ConfidenceLevel::new(0.5).is_ok());
        assert!(ConfidenceLevel::new(0.999).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfidenceLevel::P95.to_string(), "95.00%");
        assert_eq!(ConfidenceLevel::new(0.975).unwrap().to_string(), "97.50%");
    }

    #[test]
    fn test_serde_roundtrip_rejects_out_of_range() {
        let level: ConfidenceLevel = serde_json::from_str("0.99").unwrap();
        assert_eq!(level, ConfidenceLevel::P99);
        assert!(serde_json::from_str::<ConfidenceLevel>("1.5").is_err());
    }
}

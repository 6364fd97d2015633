//! Return series.

use serde::{Deserialize, Serialize};

/// An ordered series of simple periodic returns (decimals, e.g. -0.01 for -1%).
///
/// Produced from a [`PriceSeries`](super::PriceSeries) by pairwise relative
/// change, so it holds one fewer entry than the prices it came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Wraps already computed returns.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the series holds no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The returns as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over returns in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Iterates over returns strictly below `threshold`.
    pub fn below(&self, threshold: f64) -> impl Iterator<Item = f64> + '_ {
        self.iter().filter(move |&r| r < threshold)
    }
}

impl From<Vec<f64>> for ReturnSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for ReturnSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

//! In-memory price source.

use std::collections::HashMap;

use chrono::NaiveDate;

use tailrisk_core::{PriceSeries, PriceSource, SourceError};

/// Price source backed by a map of ticker to series.
///
/// Tickers are matched case-insensitively. Useful for tests and for
/// callers that already hold the data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the series for a ticker.
    pub fn insert(&mut self, ticker: impl AsRef<str>, series: PriceSeries) {
        self.series
            .insert(ticker.as_ref().to_ascii_uppercase(), series);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_series(mut self, ticker: impl AsRef<str>, series: PriceSeries) -> Self {
        self.insert(ticker, series);
        self
    }

    /// Number of tickers held.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True if no tickers are held.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl PriceSource for InMemoryPriceSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>, SourceError> {
        Ok(self
            .series
            .get(&ticker.to_ascii_uppercase())
            .and_then(|s| s.between(start, end)))
    }
}

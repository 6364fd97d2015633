//! Core traits for the Tailrisk workspace.
//!
//! - [`PriceSource`]: Provider of historical price series

use chrono::NaiveDate;

use crate::error::SourceError;
use crate::types::PriceSeries;

/// Trait for historical price providers.
///
/// Implementations return the observations for `ticker` dated within the
/// half-open range `[start, end)`.
pub trait PriceSource {
    /// Short name of the source, used in diagnostics.
    fn name(&self) -> &str;

    /// Fetches the price history for a ticker.
    ///
    /// Returns `Ok(None)` when the source has no observations for the ticker
    /// in the requested range.
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>, SourceError>;
}

impl<S: PriceSource + ?Sized> PriceSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>, SourceError> {
        (**self).fetch(ticker, start, end)
    }
}

impl<S: PriceSource + ?Sized> PriceSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>, SourceError> {
        (**self).fetch(ticker, start, end)
    }
}

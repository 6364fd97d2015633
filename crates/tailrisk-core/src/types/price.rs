//! Historical price series.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RiskError, RiskResult};

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Price (adjusted close).
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

impl fmt::Display for PricePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.price)
    }
}

/// An ordered, validated series of dated prices.
///
/// Invariants, checked on construction:
/// - at least one observation,
/// - every price is finite and strictly positive,
/// - dates are strictly increasing.
///
/// The series is immutable; transformations return new series.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use tailrisk_core::types::PriceSeries;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let series = PriceSeries::from_prices(start, &[100.0, 101.0, 99.5]).unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.last().price, 99.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from dated observations.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InsufficientData` for an empty input,
    /// `RiskError::InvalidPrice` for a non-positive or non-finite price, and
    /// `RiskError::UnorderedDates` if dates do not strictly increase.
    pub fn new(points: Vec<PricePoint>) -> RiskResult<Self> {
        if points.is_empty() {
            return Err(RiskError::insufficient_data("price series", 1, 0));
        }

        for point in &points {
            validate_price(point)?;
        }

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(RiskError::UnorderedDates {
                    previous: pair[0].date.to_string(),
                    next: pair[1].date.to_string(),
                });
            }
        }

        Ok(Self { points })
    }

    /// Builds a series of daily observations starting at `start`.
    ///
    /// Each price is assigned the next calendar day.
    pub fn from_prices(start: NaiveDate, prices: &[f64]) -> RiskResult<Self> {
        let mut points = Vec::with_capacity(prices.len());
        for (offset, &price) in prices.iter().enumerate() {
            let date = start
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| {
                    RiskError::invalid_parameter("start", "date range overflows the calendar")
                })?;
            points.push(PricePoint::new(date, price));
        }
        Self::new(points)
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a price series holds at least one observation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The observations in chronological order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Iterates over prices in chronological order.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Iterates over dates in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// The earliest observation.
    #[must_use]
    pub fn first(&self) -> &PricePoint {
        // Construction guarantees at least one point.
        &self.points[0]
    }

    /// The latest observation.
    #[must_use]
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// Returns a new series with every price multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidPrice` if a scaled price is no longer
    /// finite and positive.
    pub fn scaled(&self, factor: f64) -> RiskResult<Self> {
        let points = self
            .points
            .iter()
            .map(|p| PricePoint::new(p.date, p.price * factor))
            .collect::<Vec<_>>();
        for point in &points {
            validate_price(point)?;
        }
        Ok(Self { points })
    }

    /// Returns the observations dated within `[start, end)`, or `None` if
    /// no observation falls in the range.
    #[must_use]
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        let points: Vec<PricePoint> = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date < end)
            .copied()
            .collect();
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }
}

fn validate_price(point: &PricePoint) -> RiskResult<()> {
    if !point.price.is_finite() {
        return Err(RiskError::InvalidPrice {
            date: point.date.to_string(),
            value: point.price,
            reason: "price must be finite".into(),
        });
    }
    if point.price <= 0.0 {
        return Err(RiskError::InvalidPrice {
            date: point.date.to_string(),
            value: point.price,
            reason: "price must be positive".into(),
        });
    }
    Ok(())
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = RiskError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

//! Price-to-return conversion.

use tailrisk_core::{PriceSeries, ReturnSeries, RiskError, RiskResult};

/// Computes simple returns from a price series.
///
/// `r_i = p_i / p_{i-1} - 1` for every adjacent pair, in chronological order.
/// The first observation has no predecessor, so the result holds
/// `prices.len() - 1` returns.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` if the series has fewer than two
/// observations.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use tailrisk_core::PriceSeries;
/// use tailrisk_risk::compute_returns;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let prices = PriceSeries::from_prices(start, &[100.0, 110.0, 99.0]).unwrap();
/// let returns = compute_returns(&prices).unwrap();
/// assert_eq!(returns.len(), 2);
/// assert!((returns.as_slice()[0] - 0.10).abs() < 1e-12);
/// assert!((returns.as_slice()[1] + 0.10).abs() < 1e-12);
/// ```
pub fn compute_returns(prices: &PriceSeries) -> RiskResult<ReturnSeries> {
    if prices.len() < 2 {
        return Err(RiskError::insufficient_data(
            "compute_returns",
            2,
            prices.len(),
        ));
    }

    let values = prices
        .points()
        .windows(2)
        .map(|w| w[1].price / w[0].price - 1.0)
        .collect();

    Ok(ReturnSeries::new(values))
}

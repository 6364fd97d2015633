//! Applying crisis shocks to a price series.
//!
//! Each crisis shock `s` is realized gradually over `periods` steps: the
//! whole series is multiplied by `1 + s / periods` once per step. Crises are
//! applied one after another, so their effects compound:
//!
//! ```text
//! factor = Π_crises (1 + s / periods) ^ periods
//! ```
//!
//! Every price in the series is scaled, not just the latest one. A gradual
//! shock therefore differs from an instantaneous one: `(1 - 0.3/3)^3 = 0.729`
//! rather than `0.7`.

use super::SelectedShocks;
use tailrisk_core::{PriceSeries, RiskError, RiskResult};

/// Upper bound on the number of periods a shock is spread over.
pub const MAX_STRESS_PERIODS: u32 = 10_000;

/// Per-period multiplier for one crisis shock.
fn period_factor(shock: f64, periods: u32) -> f64 {
    1.0 + shock / f64::from(periods)
}

fn validate(shocks: &SelectedShocks, periods: u32) -> RiskResult<()> {
    if periods == 0 || periods > MAX_STRESS_PERIODS {
        return Err(RiskError::invalid_parameter(
            "periods",
            format!("{periods} is outside 1..={MAX_STRESS_PERIODS}"),
        ));
    }

    for crisis in shocks.iter() {
        let factor = period_factor(crisis.shock, periods);
        if !factor.is_finite() || factor <= 0.0 {
            return Err(RiskError::invalid_parameter(
                "shock",
                format!(
                    "'{}' ({:.2}%) over {periods} period(s) drives prices to zero or below",
                    crisis.name,
                    crisis.shock_percent()
                ),
            ));
        }
    }
    Ok(())
}

/// Overall multiplier the selected shocks apply to every price.
///
/// # Errors
///
/// Same as [`apply_stress`].
pub fn cumulative_factor(shocks: &SelectedShocks, periods: u32) -> RiskResult<f64> {
    validate(shocks, periods)?;

    let mut factor = 1.0;
    for crisis in shocks.iter() {
        let step = period_factor(crisis.shock, periods);
        for _ in 0..periods {
            factor *= step;
        }
    }
    Ok(factor)
}

/// Applies the selected crisis shocks to every price in the series.
///
/// Returns a new series; `prices` is never modified. With no shocks
/// selected, the result equals the input.
///
/// # Errors
///
/// Returns `RiskError::InvalidParameter` when `periods` is zero or above
/// [`MAX_STRESS_PERIODS`], or when a per-period factor `1 + s / periods` is
/// not positive. Returns `RiskError::InvalidPrice` if compounding drives a
/// price out of the positive finite range.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use tailrisk_core::{AssetType, PriceSeries};
/// use tailrisk_risk::stress::{apply_stress, CrisisShock, ShockTable};
///
/// let table = ShockTable::new()
///     .with_asset(AssetType::Stock, vec![CrisisShock::new("Crash", -0.3)]);
/// let shocks = table.select(AssetType::Stock, &["Crash"]).unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let prices = PriceSeries::from_prices(start, &[100.0]).unwrap();
/// let stressed = apply_stress(&prices, &shocks, 3).unwrap();
/// assert!((stressed.last().price - 72.9).abs() < 1e-9);
/// ```
pub fn apply_stress(
    prices: &PriceSeries,
    shocks: &SelectedShocks,
    periods: u32,
) -> RiskResult<PriceSeries> {
    validate(shocks, periods)?;

    let mut stressed = prices.clone();
    for crisis in shocks.iter() {
        let step = period_factor(crisis.shock, periods);
        for _ in 0..periods {
            stressed = stressed.scaled(step)?;
        }
    }
    Ok(stressed)
}

//! End-to-end risk flow: returns, VaR, shortfall, stress and backtest.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tailrisk_core::{AssetType, ConfidenceLevel, PriceSeries, RiskError};
use tailrisk_risk::prelude::*;
use tailrisk_risk::stress::standard;

fn sample_prices() -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    let prices = [
        100.0, 101.2, 99.8, 100.5, 98.9, 99.7, 101.9, 102.4, 100.1, 97.6, 98.3, 99.9, 101.0,
        100.4, 96.8, 97.9, 99.2, 100.6, 101.3, 99.5, 98.0, 98.7, 100.2, 102.0, 103.1,
    ];
    PriceSeries::from_prices(start, &prices).unwrap()
}

#[test]
fn test_baseline_run() {
    let prices = sample_prices();
    let returns = compute_returns(&prices).unwrap();
    assert_eq!(returns.len(), prices.len() - 1);

    let mut rng = StdRng::seed_from_u64(2024);
    let var = simulate_var(&returns, ConfidenceLevel::P95, 10_000, &mut rng).unwrap();
    assert!(var.var > 0.0);
    assert_eq!(var.num_simulations, 10_000);

    let es = expected_shortfall(&returns, var.var).unwrap();
    assert!(es.expected_shortfall >= var.var);

    let report = backtest(&prices, var.var, ConfidenceLevel::P95).unwrap();
    assert_eq!(report.total_observations, returns.len());
    assert_eq!(report.expected_violation_count, 1);
}

#[test]
fn test_stressed_run_keeps_return_profile() {
    let prices = sample_prices();
    let shocks = ShockTable::standard()
        .select(AssetType::Stock, &[standard::GFC_2008, standard::COVID_19])
        .unwrap();
    let stressed = apply_stress(&prices, &shocks, 5).unwrap();

    let factor = (1.0_f64 - 0.10).powi(5) * (1.0_f64 - 0.07).powi(5);
    assert_relative_eq!(
        stressed.last().price,
        prices.last().price * factor,
        epsilon = 1e-9
    );

    // a uniform rescale leaves returns and hence seeded VaR unchanged
    let base = compute_returns(&prices).unwrap();
    let shocked = compute_returns(&stressed).unwrap();
    let v1 = simulate_var(&base, ConfidenceLevel::P99, 5_000, &mut StdRng::seed_from_u64(1)).unwrap();
    let v2 =
        simulate_var(&shocked, ConfidenceLevel::P99, 5_000, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_relative_eq!(v1.var, v2.var, epsilon = 1e-9);
}

#[test]
fn test_shortfall_undefined_when_var_too_large() {
    let returns = compute_returns(&sample_prices()).unwrap();
    let err = expected_shortfall(&returns, 0.5).unwrap_err();
    assert!(matches!(err, RiskError::UndefinedShortfall { .. }));
}

#[test]
fn test_single_price_cannot_produce_returns() {
    let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    let prices = PriceSeries::from_prices(start, &[100.0]).unwrap();
    assert!(matches!(
        compute_returns(&prices),
        Err(RiskError::InsufficientData { .. })
    ));
}

//! Property-based tests for risk invariants.
//!
//! These tests verify properties that must hold for any input:
//! - n prices give n - 1 returns matching the pairwise change
//! - Expected shortfall is at least the VaR whenever it is defined
//! - Stress shocks scale every price by the same compounded factor
//! - Backtest counts are consistent with the confidence level

use approx::assert_relative_eq;
use chrono::NaiveDate;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tailrisk_core::{AssetType, ConfidenceLevel, PriceSeries, ReturnSeries};
use tailrisk_risk::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn price_vec(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1_000.0, min_len..120)
}

fn return_vec() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.2f64..0.2, 1..200)
}

fn confidence() -> impl Strategy<Value = ConfidenceLevel> {
    (0.5f64..0.995).prop_map(|c| ConfidenceLevel::new(c).unwrap())
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn returns_have_one_fewer_entry(prices in price_vec(2)) {
        let series = PriceSeries::from_prices(start_date(), &prices).unwrap();
        let returns = compute_returns(&series).unwrap();

        prop_assert_eq!(returns.len(), prices.len() - 1);
        for (i, r) in returns.iter().enumerate() {
            prop_assert!((r - (prices[i + 1] / prices[i] - 1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn shortfall_is_at_least_var(values in return_vec(), c in confidence(), seed in any::<u64>()) {
        let returns = ReturnSeries::new(values);
        let mut rng = StdRng::seed_from_u64(seed);
        let var = simulate_var(&returns, c, 500, &mut rng).unwrap();

        match expected_shortfall(&returns, var.var) {
            Ok(es) => {
                prop_assert!(es.expected_shortfall >= es.var);
                prop_assert!(es.tail_observations >= 1);
            }
            Err(e) => prop_assert!(e.is_undefined_shortfall()),
        }
    }

    #[test]
    fn var_is_reproducible_for_a_seed(values in return_vec(), seed in any::<u64>()) {
        let returns = ReturnSeries::new(values);
        let a = simulate_var(&returns, ConfidenceLevel::P95, 200, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = simulate_var(&returns, ConfidenceLevel::P95, 200, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn stress_scales_every_price_uniformly(
        prices in price_vec(1),
        positions in prop::collection::vec(1usize..=5, 0..4),
        periods in 1u32..10,
    ) {
        let series = PriceSeries::from_prices(start_date(), &prices).unwrap();
        let shocks = ShockTable::standard()
            .select_by_position(AssetType::Stock, &positions)
            .unwrap();

        let stressed = apply_stress(&series, &shocks, periods).unwrap();
        let factor = cumulative_factor(&shocks, periods).unwrap();

        prop_assert_eq!(stressed.len(), series.len());
        for (orig, new) in series.prices().zip(stressed.prices()) {
            prop_assert!((new - orig * factor).abs() <= 1e-9 * orig.max(1.0));
        }
    }

    #[test]
    fn stress_does_not_change_returns_shape(prices in price_vec(2), periods in 1u32..6) {
        // a uniform scale leaves relative changes intact
        let series = PriceSeries::from_prices(start_date(), &prices).unwrap();
        let shocks = ShockTable::standard()
            .select_by_position(AssetType::Oil, &[2])
            .unwrap();
        let stressed = apply_stress(&series, &shocks, periods).unwrap();

        let base = compute_returns(&series).unwrap();
        let shocked = compute_returns(&stressed).unwrap();
        for (a, b) in base.iter().zip(shocked.iter()) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn backtest_counts_are_consistent(values in return_vec(), var in 0.0f64..0.15, c in confidence()) {
        let returns = ReturnSeries::new(values.clone());
        let report = backtest_returns(&returns, var, c).unwrap();

        prop_assert_eq!(report.total_observations, values.len());
        prop_assert_eq!(
            report.violation_count,
            values.iter().filter(|&&r| r < -var).count()
        );
        prop_assert!(report.expected_violation_count <= report.total_observations);
        prop_assert_eq!(
            report.exceeds_expected,
            report.violation_count > report.expected_violation_count
        );
        prop_assert!((0.0..=1.0).contains(&report.kupiec.p_value));
    }
}

#[test]
fn stress_of_single_price_matches_closed_form() {
    let series = PriceSeries::from_prices(start_date(), &[100.0]).unwrap();
    let table = ShockTable::new().with_asset(
        AssetType::Commodity,
        vec![CrisisShock::new("Test", -0.3)],
    );
    let shocks = table.select(AssetType::Commodity, &["Test"]).unwrap();

    let one = apply_stress(&series, &shocks, 1).unwrap();
    assert_relative_eq!(one.first().price, 70.0, epsilon = 1e-12);

    let three = apply_stress(&series, &shocks, 3).unwrap();
    assert_relative_eq!(three.first().price, 72.9, epsilon = 1e-9);
}

//! Benchmarks for the tailrisk-risk calculations.
//!
//! Run with: cargo bench -p tailrisk-risk

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tailrisk_core::{AssetType, ConfidenceLevel, PriceSeries, ReturnSeries};
use tailrisk_risk::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Deterministic, mildly noisy price path of `len` daily observations.
fn create_price_series(len: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
    let mut price = 100.0;
    let prices: Vec<f64> = (0..len)
        .map(|i| {
            let wiggle = ((i * 37 % 101) as f64 - 50.0) / 2_500.0;
            price *= 1.0 + wiggle;
            price
        })
        .collect();
    PriceSeries::from_prices(start, &prices).unwrap()
}

fn create_returns(len: usize) -> ReturnSeries {
    compute_returns(&create_price_series(len + 1)).unwrap()
}

// =============================================================================
// VAR BENCHMARKS
// =============================================================================

fn bench_simulate_var(c: &mut Criterion) {
    let returns = create_returns(1_000);

    let mut group = c.benchmark_group("simulate_var");
    group.sample_size(30);

    for sims in [1_000usize, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*sims as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sims), sims, |b, &sims| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| simulate_var(black_box(&returns), ConfidenceLevel::P95, sims, &mut rng))
        });
    }
    group.finish();
}

fn bench_compute_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_returns");

    for len in [250usize, 2_500, 25_000].iter() {
        let prices = create_price_series(*len);
        group.throughput(Throughput::Elements(*len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &prices, |b, prices| {
            b.iter(|| compute_returns(black_box(prices)))
        });
    }
    group.finish();
}

// =============================================================================
// TAIL AND STRESS BENCHMARKS
// =============================================================================

fn bench_expected_shortfall(c: &mut Criterion) {
    let returns = create_returns(2_500);
    c.bench_function("expected_shortfall_2500", |b| {
        b.iter(|| expected_shortfall(black_box(&returns), 0.01))
    });
}

fn bench_backtest(c: &mut Criterion) {
    let prices = create_price_series(2_500);
    c.bench_function("backtest_2500", |b| {
        b.iter(|| backtest(black_box(&prices), 0.01, ConfidenceLevel::P99))
    });
}

fn bench_apply_stress(c: &mut Criterion) {
    let prices = create_price_series(2_500);
    let shocks = ShockTable::standard()
        .select_by_position(AssetType::Stock, &[1, 2, 3])
        .unwrap();

    let mut group = c.benchmark_group("apply_stress");
    for periods in [1u32, 10, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(periods), periods, |b, &p| {
            b.iter(|| apply_stress(black_box(&prices), &shocks, p))
        });
    }
    group.finish();
}

criterion_group!(var, bench_simulate_var, bench_compute_returns);
criterion_group!(tail, bench_expected_shortfall, bench_backtest, bench_apply_stress);

criterion_main!(var, tail);

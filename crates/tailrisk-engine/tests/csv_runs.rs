//! Analysis runs over CSV price files.

use std::fs;

use chrono::NaiveDate;
use tailrisk_config::AnalysisConfig;
use tailrisk_core::AssetType;
use tailrisk_engine::{AnalysisRequest, CrisisSelection, EngineError, RiskEngine, StressRequest};
use tailrisk_ext_file::CsvPriceSource;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_prices(dir: &std::path::Path, ticker: &str, count: usize) {
    let mut body = String::from("Date,Close,Adj Close\n");
    let mut price = 50.0;
    let mut day = date(2022, 1, 3);
    for i in 0..count {
        let step = [0.012, -0.018, 0.004, -0.009, 0.015, -0.031, 0.007][i % 7];
        price *= 1.0 + step;
        body.push_str(&format!("{day},{:.4},{:.4}\n", price * 1.01, price));
        day = day.succ_opt().unwrap();
    }
    fs::write(dir.join(format!("{ticker}.csv")), body).unwrap();
}

#[test]
fn test_full_run_from_config() {
    let dir = tempfile::tempdir().unwrap();
    write_prices(dir.path(), "XOM", 200);

    let config = AnalysisConfig::from_toml_str(
        r#"
        confidence_level = 0.95
        num_simulations = 5000
        seed = 99
        stress_periods = 3
        "#,
    )
    .unwrap();

    let engine =
        RiskEngine::new(CsvPriceSource::new(dir.path())).with_shock_table(config.shock_table());
    let request = AnalysisRequest::from_config("XOM", date(2022, 1, 1), date(2023, 1, 1), &config)
        .unwrap()
        .with_stress(StressRequest::new(
            AssetType::Oil,
            CrisisSelection::Positions(vec![1, 3]),
            config.stress_periods,
        ));

    let report = engine.run(&request).unwrap();
    assert_eq!(report.price_count, 200);
    assert_eq!(report.source, "csv");

    let es = report.baseline.expected_shortfall.as_ref().unwrap();
    assert!(es.expected_shortfall >= report.baseline.var.var);

    let stressed = report.stressed.as_ref().unwrap();
    assert!(stressed.stressed_last_price < report.last_price);
    // rescaling leaves returns unchanged, so stressed metrics track baseline
    assert!((stressed.metrics.var.fit.mean - report.baseline.var.fit.mean).abs() < 1e-12);

    let bt = report.backtest.as_ref().unwrap();
    assert_eq!(bt.total_observations, 199);
    assert_eq!(bt.expected_violation_count, 9);
    // every seventh day loses 3.1%, beyond the 95% VaR
    assert_eq!(bt.violation_count, 28);
    assert!(bt.exceeds_expected);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ticker"], "XOM");
    assert!(json["baseline"]["var"]["var"].is_number());
}

#[test]
fn test_window_outside_file_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    write_prices(dir.path(), "GLD", 20);

    let engine = RiskEngine::new(CsvPriceSource::new(dir.path()));
    let request = AnalysisRequest::new("GLD", date(2019, 1, 1), date(2020, 1, 1));
    let err = engine.run(&request).unwrap_err();
    assert!(matches!(err, EngineError::NoData { .. }));
    assert!(err.to_string().contains("GLD"));
}

//! # Tailrisk Engine
//!
//! Runs a complete risk analysis for one instrument.
//!
//! This crate provides:
//! - [`AnalysisRequest`]: Ticker, date window and run parameters
//! - [`RiskEngine`]: Fetches prices from a [`PriceSource`](tailrisk_core::PriceSource)
//!   and computes the report
//! - [`AnalysisReport`]: Baseline, stressed and backtest results
//!
//! ## Flow
//!
//! ```text
//! PriceSource ─> prices ─┬─> returns ─> VaR ─> ES            (baseline)
//!                        │
//!                        ├─> shocks ─> returns ─> VaR ─> ES  (stressed)
//!                        │
//!                        └─> backtest(baseline VaR)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tailrisk_core::PriceSeries;
//! use tailrisk_engine::{AnalysisRequest, RiskEngine};
//! use tailrisk_ext_file::InMemoryPriceSource;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let prices = PriceSeries::from_prices(start, &[100.0, 98.0, 101.0, 97.5, 99.0]).unwrap();
//! let engine = RiskEngine::new(InMemoryPriceSource::new().with_series("ABC", prices));
//!
//! let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let request = AnalysisRequest::new("ABC", start, end).with_seed(7);
//! let report = engine.run(&request).unwrap();
//! assert_eq!(report.baseline.observations, 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod report;
pub mod request;

pub use engine::RiskEngine;
pub use error::{EngineError, EngineResult};
pub use report::{AnalysisReport, RiskMetrics, StressedMetrics};
pub use request::{AnalysisRequest, CrisisSelection, StressRequest};

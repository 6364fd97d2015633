//! # tailrisk-risk
//!
//! Market risk analytics for a single priced instrument.
//!
//! This crate provides the risk computations of the Tailrisk workspace:
//!
//! - **Returns**: Simple returns from a price series
//! - **VaR**: Monte Carlo Value at Risk under a fitted normal distribution
//! - **Expected Shortfall**: Mean loss beyond the VaR threshold
//! - **Stress testing**: Gradual, compounding crisis shocks on prices
//! - **Backtesting**: Realized VaR violations against the expected count
//!
//! All functions are pure. Randomness is injected as a `rand::Rng`, so a
//! seeded generator gives reproducible results. Nothing here logs or prints.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tailrisk_core::{AssetType, ConfidenceLevel, PriceSeries};
//! use tailrisk_risk::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let prices = PriceSeries::from_prices(
//!     start,
//!     &[100.0, 98.0, 99.5, 97.0, 101.0, 100.2, 96.5, 98.8, 99.9, 97.3],
//! )
//! .unwrap();
//!
//! let returns = compute_returns(&prices).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let var = simulate_var(&returns, ConfidenceLevel::P95, 10_000, &mut rng).unwrap();
//! let report = backtest(&prices, var.var, ConfidenceLevel::P95).unwrap();
//! assert_eq!(report.total_observations, 9);
//!
//! let shocks = ShockTable::standard()
//!     .select_by_position(AssetType::Stock, &[1])
//!     .unwrap();
//! let stressed = apply_stress(&prices, &shocks, 3).unwrap();
//! assert!(stressed.last().price < prices.last().price);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backtest;
pub mod returns;
pub mod shortfall;
mod stats;
pub mod stress;
pub mod var;

pub use backtest::{backtest, backtest_returns, kupiec_test, BacktestReport, KupiecTest};
pub use returns::compute_returns;
pub use shortfall::{expected_shortfall, ESResult};
pub use var::{fit_normal, simulate_returns, simulate_var, NormalFit, VaRResult, MAX_SIMULATIONS};

pub use tailrisk_core::{RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backtest::*;
    pub use crate::returns::*;
    pub use crate::shortfall::*;
    pub use crate::stress::*;
    pub use crate::var::*;
    pub use crate::{RiskError, RiskResult};
}

//! # Tailrisk Core
//!
//! Core types, errors, and collaborator traits for the Tailrisk risk
//! analytics workspace.
//!
//! - **Types**: [`PriceSeries`], [`ReturnSeries`], [`ConfidenceLevel`], [`AssetType`]
//! - **Errors**: [`RiskError`] for computations, [`SourceError`] for data access
//! - **Traits**: [`PriceSource`] for historical price providers
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tailrisk_core::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let prices = PriceSeries::from_prices(start, &[100.0, 102.0, 101.0]).unwrap();
//! let confidence = ConfidenceLevel::new(0.95).unwrap();
//! assert_eq!(prices.len(), 3);
//! assert!((confidence.tail_probability() - 0.05).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{RiskError, RiskResult, SourceError};
    pub use crate::traits::PriceSource;
    pub use crate::types::{AssetType, ConfidenceLevel, PricePoint, PriceSeries, ReturnSeries};
}

// Re-export commonly used types at crate root
pub use error::{RiskError, RiskResult, SourceError};
pub use traits::PriceSource;
pub use types::{AssetType, ConfidenceLevel, PricePoint, PriceSeries, ReturnSeries};

//! Domain types for single-instrument risk analytics.
//!
//! - [`PriceSeries`]: Validated, dated price history
//! - [`ReturnSeries`]: Simple returns derived from prices
//! - [`ConfidenceLevel`]: VaR confidence level in (0, 1)
//! - [`AssetType`]: Asset class used to pick stress shocks

mod asset;
mod confidence;
mod price;
mod returns;

pub use asset::AssetType;
pub use confidence::ConfidenceLevel;
pub use price::{PricePoint, PriceSeries};
pub use returns::ReturnSeries;

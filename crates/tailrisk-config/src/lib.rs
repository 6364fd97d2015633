//! Tailrisk Configuration Layer
//!
//! This crate provides configuration for Tailrisk analysis runs: the
//! default confidence level, simulation count, RNG seed, stress periods,
//! backtest flag, price data directory and an optional custom crisis table.
//!
//! Configurations are read from TOML or JSON files (chosen by extension) and
//! checked through the [`Validate`] trait, which reports every problem found
//! rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use tailrisk_config::{AnalysisConfig, Validate};
//! use tailrisk_core::AssetType;
//!
//! let config = AnalysisConfig::from_toml_str(
//!     r#"
//!     confidence_level = 0.99
//!     seed = 42
//!
//!     [[shocks]]
//!     asset_type = "commodity"
//!     crises = [{ name = "Drought", shock = -0.2 }]
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.num_simulations, 10_000);
//!
//! let table = config.shock_table();
//! assert_eq!(table.crises(AssetType::Commodity).unwrap()[0].name, "Drought");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod error;

pub use analysis::{AnalysisConfig, AssetShocks, MAX_SIMULATIONS, MAX_STRESS_PERIODS};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

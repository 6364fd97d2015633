//! Analysis run configuration.
//!
//! Provides defaults for the parameters of a risk run. Every field is
//! optional in the file; missing fields take the defaults below.
//!
//! ```toml
//! confidence_level = 0.99
//! num_simulations = 50000
//! seed = 7
//! stress_periods = 3
//! backtest = true
//! data_dir = "prices"
//!
//! [[shocks]]
//! asset_type = "stock"
//! crises = [
//!     { name = "Flash Crash", shock = -0.10 },
//!     { name = "Rate Shock", shock = -0.25 },
//! ]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use tailrisk_core::{AssetType, ConfidenceLevel};
use tailrisk_risk::stress::{CrisisShock, ShockTable};

pub use tailrisk_risk::stress::MAX_STRESS_PERIODS;
pub use tailrisk_risk::MAX_SIMULATIONS;

/// Crisis shocks for one asset type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetShocks {
    /// Asset type the crises apply to.
    pub asset_type: AssetType,
    /// Ordered crisis list; positions are numbered from 1 in this order.
    pub crises: Vec<CrisisShock>,
}

/// Configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level for VaR and ES, in (0, 1).
    pub confidence_level: f64,

    /// Number of Monte Carlo draws.
    pub num_simulations: usize,

    /// RNG seed. Unseeded runs draw from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Number of periods a stress shock is spread over.
    pub stress_periods: u32,

    /// Whether to backtest the baseline VaR.
    pub backtest: bool,

    /// Directory holding `<TICKER>.csv` price files.
    pub data_dir: PathBuf,

    /// Custom crisis shocks. Each entry replaces the standard list for its
    /// asset type; asset types not listed keep the standard crises.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shocks: Option<Vec<AssetShocks>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: ConfidenceLevel::P95.value(),
            num_simulations: 10_000,
            seed: None,
            stress_periods: 1,
            backtest: true,
            data_dir: PathBuf::from("data"),
            shocks: None,
        }
    }
}

impl AnalysisConfig {
    /// Loads and validates a configuration file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing file,
    /// `ConfigError::UnsupportedFormat` for any other extension, a
    /// deserialization error for malformed content, and a validation error
    /// when a value is out of range.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let content = fs::read_to_string(path)?;

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Renders the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configured confidence level.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Risk` when the value lies outside (0, 1).
    pub fn confidence(&self) -> ConfigResult<ConfidenceLevel> {
        Ok(ConfidenceLevel::new(self.confidence_level)?)
    }

    /// The crisis table for this configuration: the standard table with any
    /// custom asset entries substituted.
    #[must_use]
    pub fn shock_table(&self) -> ShockTable {
        let mut table = ShockTable::standard();
        for entry in self.shocks.iter().flatten() {
            table = table.with_asset(entry.asset_type, entry.crises.clone());
        }
        table
    }

    /// Builder: sets the confidence level.
    #[must_use]
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Builder: sets the simulation count.
    #[must_use]
    pub fn with_num_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    /// Builder: sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: sets the number of stress periods.
    #[must_use]
    pub fn with_stress_periods(mut self, periods: u32) -> Self {
        self.stress_periods = periods;
        self
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            errors.push(ValidationError::with_rule(
                "confidence_level",
                format!(
                    "Confidence level {} must lie strictly between 0 and 1",
                    self.confidence_level
                ),
                "open_unit_interval",
            ));
        }

        if self.num_simulations == 0 || self.num_simulations > MAX_SIMULATIONS {
            errors.push(ValidationError::with_rule(
                "num_simulations",
                format!("Simulation count must be between 1 and {MAX_SIMULATIONS}"),
                "valid_simulations",
            ));
        }

        if self.stress_periods == 0 || self.stress_periods > MAX_STRESS_PERIODS {
            errors.push(ValidationError::with_rule(
                "stress_periods",
                format!("Stress periods must be between 1 and {MAX_STRESS_PERIODS}"),
                "valid_periods",
            ));
        }

        let mut seen = BTreeSet::new();
        for entry in self.shocks.iter().flatten() {
            if !seen.insert(entry.asset_type) {
                errors.push(ValidationError::with_rule(
                    "shocks",
                    format!("Asset type '{}' is listed more than once", entry.asset_type),
                    "unique_asset_type",
                ));
            }
            errors.extend(entry.validate());
        }

        errors
    }
}

impl Validate for AssetShocks {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let field = format!("shocks.{}", self.asset_type);

        let mut names = BTreeSet::new();
        for crisis in &self.crises {
            if crisis.name.trim().is_empty() {
                errors.push(ValidationError::new(&field, "Crisis name cannot be empty"));
            } else if !names.insert(crisis.name.as_str()) {
                errors.push(ValidationError::with_rule(
                    &field,
                    format!("Crisis '{}' is listed more than once", crisis.name),
                    "unique_crisis",
                ));
            }

            if !crisis.shock.is_finite() || crisis.shock <= -1.0 {
                errors.push(ValidationError::with_rule(
                    &field,
                    format!(
                        "Shock {} for '{}' must be finite and greater than -1",
                        crisis.shock, crisis.name
                    ),
                    "valid_shock",
                ));
            }
        }

        errors
    }
}

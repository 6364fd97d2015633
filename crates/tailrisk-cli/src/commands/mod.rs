//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod crises;
pub mod interactive;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use crises::CrisesArgs;
pub use interactive::InteractiveArgs;

use std::path::Path;

use chrono::NaiveDate;
use tailrisk_config::AnalysisConfig;
use tailrisk_core::{AssetType, ConfidenceLevel};
use tailrisk_engine::CrisisSelection;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tailrisk.toml";

/// Loads the configuration from `path`, or `./tailrisk.toml` if present, or
/// the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            Ok(AnalysisConfig::from_file(path)?)
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            debug!(path = DEFAULT_CONFIG_FILE, "Loading configuration");
            Ok(AnalysisConfig::from_file(DEFAULT_CONFIG_FILE)?)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(s.trim().to_string()))
}

/// Parses a start/end pair, requiring start < end.
pub fn parse_date_range(start: &str, end: &str) -> CliResult<(NaiveDate, NaiveDate)> {
    let (s, e) = (parse_date(start)?, parse_date(end)?);
    if s >= e {
        return Err(CliError::InvalidDateRange {
            start: s.to_string(),
            end: e.to_string(),
        });
    }
    Ok((s, e))
}

/// Parses a confidence level in (0, 1).
pub fn parse_confidence(s: &str) -> CliResult<ConfidenceLevel> {
    s.trim()
        .parse::<f64>()
        .ok()
        .and_then(|c| ConfidenceLevel::new(c).ok())
        .ok_or_else(|| CliError::InvalidConfidence(s.trim().to_string()))
}

/// Validates a confidence level given as a number.
pub fn validate_confidence(c: f64) -> CliResult<ConfidenceLevel> {
    ConfidenceLevel::new(c).map_err(|_| CliError::InvalidConfidence(c.to_string()))
}

/// Parses a count in `1..=max`.
pub fn parse_count<T>(s: &str, what: &'static str, max: T) -> CliResult<T>
where
    T: std::str::FromStr + PartialOrd + Default + std::fmt::Display,
{
    match s.trim().parse::<T>() {
        Ok(n) if n > T::default() && n <= max => Ok(n),
        _ => Err(CliError::InvalidCount {
            what,
            value: s.trim().to_string(),
            max: max.to_string(),
        }),
    }
}

/// Parses an asset type (stock, commodity, oil).
pub fn parse_asset_type(s: &str) -> CliResult<AssetType> {
    s.parse()
        .map_err(|_| CliError::InvalidAssetType(s.trim().to_string()))
}

/// Parses a crisis selection.
///
/// Items are either all 1-based numbers, all crisis names, or the single
/// word `all`.
pub fn parse_crisis_selection(items: &[String]) -> CliResult<CrisisSelection> {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        return Err(CliError::InvalidCrisisSelection(
            "select at least one crisis".into(),
        ));
    }
    if items.len() == 1 && items[0].eq_ignore_ascii_case("all") {
        return Ok(CrisisSelection::All);
    }

    let numbers: Vec<Option<usize>> = items.iter().map(|s| s.parse().ok()).collect();
    if numbers.iter().all(Option::is_some) {
        return Ok(CrisisSelection::Positions(numbers.into_iter().flatten().collect()));
    }
    if numbers.iter().all(Option::is_none) {
        return Ok(CrisisSelection::Names(
            items.into_iter().map(str::to_string).collect(),
        ));
    }

    Err(CliError::InvalidCrisisSelection(
        "use either crisis numbers or crisis names, not both".into(),
    ))
}

/// Splits a line such as "1 3" or "1,3" into selection items.
pub fn split_selection(line: &str) -> Vec<String> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses yes/no (also y/n).
pub fn parse_yes_no(s: &str) -> CliResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        other => Err(CliError::InvalidAnswer(other.to_string())),
    }
}

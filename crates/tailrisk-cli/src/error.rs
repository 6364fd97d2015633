//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Ticker that is empty or contains whitespace.
    #[error("Invalid ticker: '{0}'.")]
    InvalidTicker(String),

    /// Start date not before end date.
    #[error("Start date {start} must be before end date {end}.")]
    InvalidDateRange {
        /// Start date as entered.
        start: String,
        /// End date as entered.
        end: String,
    },

    /// Confidence level outside (0, 1).
    #[error("Invalid confidence level: {0}. Must be between 0 and 1, e.g. 0.95.")]
    InvalidConfidence(String),

    /// Count that is unparseable or outside its allowed range.
    #[error("Invalid {what}: {value}. Must be a whole number between 1 and {max}.")]
    InvalidCount {
        /// Which count was entered.
        what: &'static str,
        /// The value as entered.
        value: String,
        /// Largest accepted value.
        max: String,
    },

    /// Unknown asset type.
    #[error("Unknown asset type: {0}. Use stock, commodity or oil.")]
    InvalidAssetType(String),

    /// Bad crisis selection.
    #[error("Invalid crisis selection: {0}")]
    InvalidCrisisSelection(String),

    /// Answer other than yes or no.
    #[error("Please answer yes or no (got '{0}').")]
    InvalidAnswer(String),

    /// Input ended before the session finished.
    #[error("Input closed before all questions were answered")]
    InputClosed,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

//! Engine error types.

use chrono::NaiveDate;
use thiserror::Error;

use tailrisk_config::ConfigError;
use tailrisk_core::{RiskError, SourceError};

/// Engine result type.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The source returned no prices for the request.
    #[error("no data found for {ticker} between {start} and {end}; check the ticker and date range")]
    NoData {
        /// Requested ticker.
        ticker: String,
        /// Inclusive start date.
        start: NaiveDate,
        /// Exclusive end date.
        end: NaiveDate,
    },

    /// The request itself is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Price source error
    #[error("price source error: {0}")]
    Source(#[from] SourceError),

    /// Risk calculation error
    #[error("risk calculation error: {0}")]
    Risk(#[from] RiskError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Creates an invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }
}

//! Error types for the Tailrisk workspace.
//!
//! [`RiskError`] covers every failure of the risk computations themselves.
//! [`SourceError`] covers failures of price-data collaborators.

use thiserror::Error;

/// A specialized Result type for risk computations.
pub type RiskResult<T> = Result<T, RiskError>;

/// The main error type for risk computations.
///
/// Every variant is terminal for the step that produced it: it signals
/// invalid input or a statistically undefined result, never a transient fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// A series is too short for the requested statistic.
    #[error("Insufficient data for {context}: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// The computation that needed more data.
        context: String,
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations supplied.
        actual: usize,
    },

    /// No return breaches the VaR threshold, so the tail mean is undefined.
    #[error("Expected shortfall undefined: no return falls below the VaR threshold of {var}")]
    UndefinedShortfall {
        /// The VaR threshold that no observation exceeded.
        var: f64,
    },

    /// The shock table has no entry for the requested asset type.
    #[error("Unknown asset type: {asset_type}")]
    UnknownAssetType {
        /// The asset type that was requested.
        asset_type: String,
    },

    /// The requested crisis is not defined for the asset type.
    #[error("Unknown crisis '{crisis}' for asset type {asset_type}")]
    UnknownCrisis {
        /// Asset type whose crisis list was searched.
        asset_type: String,
        /// The crisis name that was not found.
        crisis: String,
    },

    /// A parameter is outside its valid domain.
    #[error("Invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A price is non-positive or not finite.
    #[error("Invalid price {value} at {date}: {reason}")]
    InvalidPrice {
        /// Date of the offending observation.
        date: String,
        /// The invalid price.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// Price dates are not strictly increasing.
    #[error("Price dates must be strictly increasing: {previous} is followed by {next}")]
    UnorderedDates {
        /// The earlier date in input order.
        previous: String,
        /// The date that failed to advance.
        next: String,
    },

    /// A numerical routine failed.
    #[error("Calculation failed in {context}: {reason}")]
    CalculationFailed {
        /// The computation that failed.
        context: String,
        /// Description of the failure.
        reason: String,
    },
}

impl RiskError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            actual,
        }
    }

    /// Creates an undefined shortfall error.
    #[must_use]
    pub fn undefined_shortfall(var: f64) -> Self {
        Self::UndefinedShortfall { var }
    }

    /// Creates an unknown asset type error.
    #[must_use]
    pub fn unknown_asset_type(asset_type: impl Into<String>) -> Self {
        Self::UnknownAssetType {
            asset_type: asset_type.into(),
        }
    }

    /// Creates an unknown crisis error.
    #[must_use]
    pub fn unknown_crisis(asset_type: impl Into<String>, crisis: impl Into<String>) -> Self {
        Self::UnknownCrisis {
            asset_type: asset_type.into(),
            crisis: crisis.into(),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a calculation failure error.
    #[must_use]
    pub fn calculation_failed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CalculationFailed {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error reports an undefined expected shortfall.
    #[must_use]
    pub fn is_undefined_shortfall(&self) -> bool {
        matches!(self, Self::UndefinedShortfall { .. })
    }
}

/// Errors raised by price-data sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// IO error while reading the backing store.
    #[error("IO error: {0}")]
    IoError(String),

    /// A record could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),

    /// The data parsed but does not form a valid price series.
    #[error("invalid series for {ticker}: {source}")]
    InvalidSeries {
        /// Ticker whose data was rejected.
        ticker: String,
        /// Underlying validation failure.
        #[source]
        source: RiskError,
    },
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::IoError(e.to_string())
    }
}

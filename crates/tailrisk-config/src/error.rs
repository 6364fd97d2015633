//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File extension is neither `.toml` nor `.json`.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// A configured value was rejected by the risk library.
    #[error("Invalid configuration value: {0}")]
    Risk(#[from] tailrisk_core::RiskError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConfigError::Deserialization(err.to_string())
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysBad(usize);

    impl Validate for AlwaysBad {
        fn validate(&self) -> Vec<ValidationError> {
            (0..self.0)
                .map(|i| ValidationError::with_rule(format!("field{i}"), "bad", "always"))
                .collect()
        }
    }

    #[test]
    fn test_single_error_becomes_validation() {
        let err = AlwaysBad(1).validate_or_error().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "field0"));
    }

    #[test]
    fn test_many_errors_are_collected() {
        let err = AlwaysBad(3).validate_or_error().unwrap_err();
        match err {
            ConfigError::MultipleValidationErrors(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_valid_when_no_errors() {
        assert!(AlwaysBad(0).is_valid());
        assert!(AlwaysBad(0).validate_or_error().is_ok());
    }

    #[test]
    fn test_display_includes_rule() {
        let err = ValidationError::with_rule("num_simulations", "must be positive", "min");
        assert_eq!(err.to_string(), "num_simulations: must be positive (rule: min)");
    }
}

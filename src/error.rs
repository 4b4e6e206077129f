//! Error types for the net-pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate configuration
//! or running a payroll calculation.

use thiserror::Error;

/// The main error type for the net-pay engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use netpay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/income_tax.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/income_tax.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate preset is configured for the requested fiscal year and there
    /// is no other year to fall back to.
    #[error("No rate preset configured for fiscal year {fiscal_year}")]
    ConfigurationMissing {
        /// The fiscal year that was requested.
        fiscal_year: i32,
    },

    /// The income-tax schedule violates its ordering invariants.
    #[error("Invalid tax schedule: {message}")]
    InvalidSchedule {
        /// A description of the violated invariant.
        message: String,
    },

    /// A calculation input was rejected before any computation took place.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/presets/2025.yaml".to_string(),
            message: "missing field `health_rate`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/presets/2025.yaml': missing field `health_rate`"
        );
    }

    #[test]
    fn test_configuration_missing_displays_year() {
        let error = EngineError::ConfigurationMissing { fiscal_year: 2031 };
        assert_eq!(
            error.to_string(),
            "No rate preset configured for fiscal year 2031"
        );
    }

    #[test]
    fn test_invalid_schedule_displays_message() {
        let error = EngineError::InvalidSchedule {
            message: "ceilings must strictly increase".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid tax schedule: ceilings must strictly increase"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("target_net_monthly", "must not be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input 'target_net_monthly': must not be negative"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "target net pay is unreachable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error: target net pay is unreachable"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_preset() -> EngineResult<()> {
            Err(EngineError::ConfigurationMissing { fiscal_year: 2020 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_preset()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

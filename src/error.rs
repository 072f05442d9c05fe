//! Error types for the payroll engine.
//!
//! The pay calculation itself never fails. These errors come from the
//! surrounding collaborators: configuration loading, record validation,
//! lock gating, schedule expansion, backup parsing and transfer links.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::WorkLogLocked {
///     log_id: "log_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Work log 'log_001' is locked and cannot be changed");
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

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A work log was invalid or contained inconsistent data.
    #[error("Invalid work log '{log_id}': {message}")]
    InvalidWorkLog {
        /// The ID of the invalid work log.
        log_id: String,
        /// A description of what made the log invalid.
        message: String,
    },

    /// No work log exists with the given ID.
    #[error("Work log not found: {log_id}")]
    WorkLogNotFound {
        /// The ID that was looked up.
        log_id: String,
    },

    /// The work log belongs to a paid (closed) month.
    #[error("Work log '{log_id}' is locked and cannot be changed")]
    WorkLogLocked {
        /// The ID of the locked work log.
        log_id: String,
    },

    /// A repeat schedule could not be expanded.
    #[error("Invalid repeat schedule: {message}")]
    InvalidSchedule {
        /// A description of the problem.
        message: String,
    },

    /// A backup document did not have the expected shape.
    #[error("Invalid backup file: {message}")]
    InvalidBackup {
        /// A description of the problem.
        message: String,
    },

    /// The bank name could not be resolved to a routing code.
    #[error("Unsupported bank name: {bank_name}")]
    UnknownBank {
        /// The bank name as entered.
        bank_name: String,
    },

    /// Transfers must be for a positive amount.
    #[error("Transfer amount must be positive, got {amount}")]
    InvalidTransferAmount {
        /// The rejected amount.
        amount: Decimal,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "taxRate".to_string(),
            message: "must be between 0 and 100".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'taxRate': must be between 0 and 100"
        );
    }

    #[test]
    fn test_work_log_not_found_displays_id() {
        let error = EngineError::WorkLogNotFound {
            log_id: "log_404".to_string(),
        };
        assert_eq!(error.to_string(), "Work log not found: log_404");
    }

    #[test]
    fn test_unknown_bank_displays_name() {
        let error = EngineError::UnknownBank {
            bank_name: "Mars Bank".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported bank name: Mars Bank");
    }

    #[test]
    fn test_invalid_transfer_amount_displays_amount() {
        let error = EngineError::InvalidTransferAmount { amount: dec!(0) };
        assert_eq!(error.to_string(), "Transfer amount must be positive, got 0");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_locked() -> EngineResult<()> {
            Err(EngineError::WorkLogLocked {
                log_id: "log_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_locked()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::WorkLogLocked { .. })
        ));
    }
}

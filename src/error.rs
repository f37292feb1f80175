//! Centralized error types for LazyTable.
//!
//! All error types use `thiserror`. Operations on missing rows are no-ops
//! and never surface here.

use thiserror::Error;

use crate::config::ConfigError;
use crate::table::StoreError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Row store invariant violations.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// IO errors (terminal, file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Store(StoreError::DuplicateId(id)) => {
                format!("A row with id {} already exists.", id)
            }
            AppError::Io(_) => "A terminal or file operation failed.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error prevents the application from running.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Io(_) | AppError::Terminal(_)
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_store_error() {
        let app_err: AppError = StoreError::DuplicateId(4).into();
        assert!(matches!(app_err, AppError::Store(StoreError::DuplicateId(4))));
    }

    #[test]
    fn test_user_message_duplicate_id() {
        let err = AppError::Store(StoreError::DuplicateId(12));
        assert_eq!(err.user_message(), "A row with id 12 already exists.");
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "tick_rate_ms must be greater than zero".to_string(),
        ));
        assert!(err.user_message().contains("tick_rate_ms"));
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::terminal("raw mode").is_critical());
        assert!(!AppError::Store(StoreError::DuplicateId(1)).is_critical());
        assert!(!AppError::other("oops").is_critical());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
    }
}

//! Logging setup errors

use thiserror::Error;

pub type LoggingResult<T> = Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    /// Configured level is not a valid filter directive
    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    /// A global subscriber was already installed
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

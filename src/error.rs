//! This module defines all error types used throughout the application.

use crate::automaton::StateId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A state was queried that was never inserted into the table
    #[error("State {0} not found in transition table")]
    StateNotFound(StateId),

    /// An edge was queried between two states that are not connected
    #[error("No transition from state {from} to state {to}")]
    TransitionNotFound { from: StateId, to: StateId },

    /// Symbol encoding rejected under the strict symbol policy
    #[error("Malformed touch symbol {encoding:?}: {reason}")]
    MalformedSymbol { encoding: String, reason: String },

    /// DFA conversion needs a freshly constructed destination table
    #[error("Destination table already has {0} state(s); DFA conversion requires an empty table")]
    NonEmptyDestination(usize),

    /// Subset construction produced more DFA states than allowed
    #[error("DFA state limit of {limit} exceeded during subset construction")]
    StateLimitExceeded { limit: usize },

    /// Automaton definition file errors
    #[error("Definition error in {file:?}: {message}")]
    Definition { file: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors (JSON output)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a malformed symbol error
    pub fn malformed_symbol(encoding: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSymbol {
            encoding: encoding.into(),
            reason: reason.into(),
        }
    }

    /// Create a definition error for the given file
    pub fn definition(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Definition {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Check if error is a missing state or edge lookup
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::StateNotFound(_) | Error::TransitionNotFound { .. }
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Definition {
            file: PathBuf::from("unknown"),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON error: {}", err))
    }
}

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::custom("test error");
        assert_eq!(err.to_string(), "test error");

        let err = Error::malformed_symbol("X", "core too short");
        assert_eq!(err.to_string(), "Malformed touch symbol \"X\": core too short");
    }

    #[test]
    fn test_not_found() {
        assert!(Error::StateNotFound(7).is_not_found());
        assert!(Error::TransitionNotFound { from: 1, to: 2 }.is_not_found());
        assert!(!Error::custom("other").is_not_found());
    }

    #[test]
    fn test_custom_error_macro() {
        let err = custom_error!("state {} missing", 3);
        assert_eq!(err.to_string(), "state 3 missing");
    }
}

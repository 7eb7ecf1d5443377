//! Error types for the DealEase demo engine
//!
//! This module defines the error type used throughout the crate. `DemoError`
//! carries the four domain conditions surfaced by the session store
//! (`InvalidArgument`, `InvalidState`, `MalformedPayload`, `PersistenceFailure`)
//! plus the ambient failures of configuration, I/O and logger setup.

use thiserror::Error;

/// Main error type for the DealEase demo engine
#[derive(Error, Debug)]
pub enum DemoError {
    /// A caller supplied a value the engine does not recognize, such as an
    /// unknown density tier or an infeasible volume specification.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested operation is not supported in the current session state.
    /// The store was left unchanged.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// An import or rehydration payload was structurally invalid or incomplete.
    /// The store was left unchanged.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The durable storage backend failed to read or write the session record.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error (JSON): {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The global logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias for operations that can fail with a [DemoError]
pub type Result<T> = std::result::Result<T, DemoError>;

impl DemoError {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        DemoError::InvalidArgument(msg.into())
    }

    /// Create a new invalid state error
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        DemoError::InvalidState(msg.into())
    }

    /// Create a new malformed payload error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        DemoError::MalformedPayload(msg.into())
    }

    /// Create a new persistence failure error
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        DemoError::PersistenceFailure(msg.into())
    }

    /// Returns `true` for the conditions that leave the store untouched.
    pub fn is_no_op(&self) -> bool {
        matches!(
            self,
            DemoError::InvalidArgument(_) | DemoError::InvalidState(_) | DemoError::MalformedPayload(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_condition_name() {
        let err = DemoError::invalid_state("reset requires an active session");
        assert_eq!(err.to_string(), "Invalid state: reset requires an active session");

        let err = DemoError::persistence("quota exceeded");
        assert!(err.to_string().starts_with("Persistence failure"));
    }

    #[test]
    fn test_no_op_classification() {
        assert!(DemoError::invalid_argument("ultra").is_no_op());
        assert!(DemoError::malformed("not json").is_no_op());
        assert!(!DemoError::persistence("disk full").is_no_op());
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DemoError = parse_err.into();
        assert!(matches!(err, DemoError::SerdeJson(_)));
    }
}

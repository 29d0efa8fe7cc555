//! Error types for the taskboard core.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the core.
///
/// Filtering and sorting degrade gracefully wherever they can; these errors
/// only cover input that cannot be meaningfully defaulted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The caller passed input that violates the function contract.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input.
        message: String,
    },

    /// A textual value did not name any known variant.
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownValue {
        /// The kind of value being parsed (e.g. "priority").
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated list of accepted values.
        expected: String,
    },
}

impl CoreError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an unknown value error listing the accepted values.
    pub fn unknown_value(kind: &'static str, value: impl Into<String>, expected: &[&str]) -> Self {
        CoreError::UnknownValue {
            kind,
            value: value.into(),
            expected: expected.join(", "),
        }
    }
}

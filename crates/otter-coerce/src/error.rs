//! Coercion error types

use crate::value::Value;
use thiserror::Error;

/// Errors raised while converting values.
///
/// Every variant is fatal to the conversion in progress and is handed back
/// to the caller untouched.
#[derive(Debug, Error)]
pub enum VmError {
    /// Type error (e.g., calling non-function)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Range error (e.g., invalid time value)
    #[error("RangeError: {0}")]
    RangeError(String),

    /// Internal error
    #[error("InternalError: {0}")]
    InternalError(String),

    /// Native call depth exceeded
    #[error("RangeError: Maximum call stack size exceeded")]
    StackOverflow,

    /// Value thrown by a user-supplied function
    #[error("Uncaught exception: {0}")]
    Exception(Box<ThrownValue>),
}

/// A thrown JavaScript value
#[derive(Debug)]
pub struct ThrownValue {
    /// The thrown value
    pub value: Value,
    /// The thrown value (as a string representation)
    pub message: String,
}

impl std::fmt::Display for ThrownValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl VmError {
    /// Create a type error
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a range error
    pub fn range_error(msg: impl Into<String>) -> Self {
        Self::RangeError(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Create an exception from a thrown JS value
    pub fn exception(value: Value) -> Self {
        let message = value.display_string();
        Self::Exception(Box::new(ThrownValue { message, value }))
    }

    /// The thrown value, if this error carries one
    pub fn thrown_value(&self) -> Option<&Value> {
        match self {
            Self::Exception(thrown) => Some(&thrown.value),
            _ => None,
        }
    }

    /// Message of a `TypeError`, without the `TypeError: ` prefix
    pub fn type_error_message(&self) -> Option<&str> {
        match self {
            Self::TypeError(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Result type for VM operations
pub type VmResult<T> = std::result::Result<T, VmError>;

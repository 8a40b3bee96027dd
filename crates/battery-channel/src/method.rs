//! Method call and response types

use serde::Serialize;
use serde_json::Value;

/// Error code for results that cannot be encoded
pub const SERIALIZATION_FAILED: &str = "SERIALIZATION_FAILED";

/// A named request from the application shell
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Value,
}

impl MethodCall {
    /// Call without arguments
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }

    /// Call with arguments
    pub fn with_arguments(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Outcome of a single method call
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// Call handled, carrying its result
    Success(Value),

    /// Call handled but failed
    Error {
        code: String,
        message: Option<String>,
        details: Value,
    },

    /// No handler for this method
    NotImplemented,
}

impl MethodResponse {
    /// Success from any serializable result.
    ///
    /// A result that cannot be represented as JSON is answered with a
    /// `SERIALIZATION_FAILED` error rather than a success.
    pub fn success(result: impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => MethodResponse::Success(value),
            Err(e) => {
                tracing::warn!("Failed to serialize method result: {}", e);
                MethodResponse::error(SERIALIZATION_FAILED, e.to_string())
            }
        }
    }

    /// Error without details
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        MethodResponse::Error {
            code: code.into(),
            message: Some(message.into()),
            details: Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success(_))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, MethodResponse::NotImplemented)
    }

    /// Error code, if this is an error
    pub fn error_code(&self) -> Option<&str> {
        match self {
            MethodResponse::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

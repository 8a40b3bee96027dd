//! JSON method codec
//!
//! Wire format:
//!
//! | Message | Encoding |
//! |---------|----------|
//! | call | `{"method": "<name>", "args": <value>}` (`args` optional) |
//! | success | `[<result>]` |
//! | error | `["<code>", "<message>" or null, <details>]` |
//! | not implemented | empty reply |

use crate::{MethodCall, MethodResponse};
use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid method call: {0}")]
    InvalidCall(String),

    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),
}

/// Encodes calls and replies as UTF-8 JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl JsonMethodCodec {
    pub fn encode_method_call(&self, call: &MethodCall) -> Result<Vec<u8>, CodecError> {
        let mut message = Map::new();
        message.insert("method".into(), Value::String(call.method.clone()));
        if !call.arguments.is_null() {
            message.insert("args".into(), call.arguments.clone());
        }
        Ok(serde_json::to_vec(&Value::Object(message))?)
    }

    pub fn decode_method_call(&self, message: &[u8]) -> Result<MethodCall, CodecError> {
        let value: Value = serde_json::from_slice(message)?;
        let Value::Object(mut object) = value else {
            return Err(CodecError::InvalidCall("expected a JSON object".into()));
        };

        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            Some(other) => {
                return Err(CodecError::InvalidCall(format!(
                    "method must be a string, got {}",
                    other
                )));
            }
            None => return Err(CodecError::InvalidCall("missing method".into())),
        };
        let arguments = object.remove("args").unwrap_or(Value::Null);

        Ok(MethodCall { method, arguments })
    }

    /// Encode the reply to a call. Not implemented encodes as zero bytes.
    pub fn encode_response(&self, response: &MethodResponse) -> Result<Vec<u8>, CodecError> {
        let envelope = match response {
            MethodResponse::Success(result) => json!([result]),
            MethodResponse::Error {
                code,
                message,
                details,
            } => json!([code, message, details]),
            MethodResponse::NotImplemented => return Ok(Vec::new()),
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    pub fn decode_envelope(&self, envelope: &[u8]) -> Result<MethodResponse, CodecError> {
        if envelope.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }

        let value: Value = serde_json::from_slice(envelope)?;
        let Value::Array(mut items) = value else {
            return Err(CodecError::InvalidEnvelope("expected a JSON array".into()));
        };

        match items.len() {
            1 => Ok(MethodResponse::Success(items.remove(0))),
            3 => {
                let details = items.remove(2);
                let message = match items.remove(1) {
                    Value::String(message) => Some(message),
                    Value::Null => None,
                    other => {
                        return Err(CodecError::InvalidEnvelope(format!(
                            "error message must be a string or null, got {}",
                            other
                        )));
                    }
                };
                let code = match items.remove(0) {
                    Value::String(code) => code,
                    other => {
                        return Err(CodecError::InvalidEnvelope(format!(
                            "error code must be a string, got {}",
                            other
                        )));
                    }
                };
                Ok(MethodResponse::Error {
                    code,
                    message,
                    details,
                })
            }
            n => Err(CodecError::InvalidEnvelope(format!(
                "expected 1 or 3 elements, got {}",
                n
            ))),
        }
    }
}

//! Named method channel with a single handler

use crate::{CodecError, JsonMethodCodec, MethodCall, MethodResponse};

/// Answers method calls arriving on a channel
pub trait MethodCallHandler {
    fn on_method_call(&self, call: &MethodCall) -> MethodResponse;
}

impl<F> MethodCallHandler for F
where
    F: Fn(&MethodCall) -> MethodResponse,
{
    fn on_method_call(&self, call: &MethodCall) -> MethodResponse {
        self(call)
    }
}

/// Method channel between the application shell and the platform host
pub struct MethodChannel {
    name: String,
    codec: JsonMethodCodec,
    handler: Option<Box<dyn MethodCallHandler>>,
}

impl MethodChannel {
    /// Create a channel with no handler
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codec: JsonMethodCodec,
            handler: None,
        }
    }

    /// Channel name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &JsonMethodCodec {
        &self.codec
    }

    /// Register the handler, replacing any previous one
    pub fn set_method_call_handler(&mut self, handler: impl MethodCallHandler + 'static) {
        tracing::debug!("Handler registered on {}", self.name);
        self.handler = Some(Box::new(handler));
    }

    pub fn clear_method_call_handler(&mut self) {
        self.handler = None;
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Dispatch a decoded call. Without a handler every call is not implemented.
    pub fn invoke(&self, call: &MethodCall) -> MethodResponse {
        let response = match &self.handler {
            Some(handler) => handler.on_method_call(call),
            None => MethodResponse::NotImplemented,
        };

        tracing::debug!(
            channel = %self.name,
            method = %call.method,
            success = response.is_success(),
            not_implemented = response.is_not_implemented(),
            "Method call handled"
        );
        response
    }

    /// Decode an encoded call, dispatch it, and encode the reply
    pub fn handle_message(&self, message: &[u8]) -> Result<Vec<u8>, CodecError> {
        let call = self.codec.decode_method_call(message)?;
        let response = self.invoke(&call);
        self.codec.encode_response(&response)
    }
}

impl std::fmt::Debug for MethodChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodChannel")
            .field("name", &self.name)
            .field("has_handler", &self.has_handler())
            .finish()
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FIXED_REQUEST_ID, JSONRPC_VERSION, METHOD_SEPARATOR};

/// A JSON-RPC request envelope.
///
/// Serializes to exactly `id`, `jsonrpc`, `method`, `params`, in that order.
/// `params` is always present, as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: i64,
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl RequestEnvelope {
    pub fn new(method: String, params: Vec<Value>) -> Self {
        Self {
            id: FIXED_REQUEST_ID,
            jsonrpc: JSONRPC_VERSION.to_string(),
            method,
            params,
        }
    }

    /// Stamp a different protocol version string on the envelope
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.jsonrpc = version.into();
        self
    }

    /// Split the wire method back into `(target, method)`.
    ///
    /// Splits on the first separator, so method names may themselves contain `::`.
    pub fn target_and_method(&self) -> Option<(&str, &str)> {
        self.method.split_once(METHOD_SEPARATOR)
    }
}

/// Format the wire method name for `method` on `target`
pub fn format_method(target: &str, method: &str) -> String {
    format!("{target}{METHOD_SEPARATOR}{method}")
}

/// Build the request envelope for calling `method` on `target`.
///
/// Pure and infallible: identifiers are joined as given, so checking them
/// is up to the caller. The envelope always carries id `0` and version `"2.0"`.
pub fn build_request(target: &str, method: &str, params: Vec<Value>) -> RequestEnvelope {
    RequestEnvelope::new(format_method(target, method), params)
}

//! # JSON-RPC 2.0 Envelopes
//!
//! Transport-agnostic wire types for calling `Target::method` style procedures
//! over JSON-RPC 2.0. This crate builds request envelopes and validates the
//! response envelopes a server sends back; it does no I/O.
//!
//! ## Features
//! - Request construction with positional parameters
//! - Response validation (exactly one of `result` / `error`)
//! - Standard error code classification
//!
//! ```rust
//! use serde_json::json;
//! use tether_rpc_protocol::{build_request, params};
//!
//! let request = build_request("FooBar", "fizzBuzz", params![1, "two", [3]]);
//! assert_eq!(request.method, "FooBar::fizzBuzz");
//! assert_eq!(
//!     serde_json::to_value(&request).unwrap(),
//!     json!({"id": 0, "jsonrpc": "2.0", "method": "FooBar::fizzBuzz", "params": [1, "two", [3]]})
//! );
//! ```

pub mod error;
pub mod request;
pub mod response;

// Re-export main types
pub use error::{ErrorCode, ErrorObject, MalformedResponse};
pub use request::{RequestEnvelope, build_request, format_method};
pub use response::{ResponseEnvelope, ResponseOutcome};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Joins a target identifier and a method name into the wire `method` field
pub const METHOD_SEPARATOR: &str = "::";

/// Every request carries this id; responses are never correlated by id.
pub const FIXED_REQUEST_ID: i64 = 0;

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}

#[doc(hidden)]
pub mod __private {
    pub use serde_json::{Value, json};
}

/// Builds the ordered positional parameter list for a call.
///
/// Arguments use `json!` syntax, so each one is either a JSON literal
/// (`null`, `{"k": "v"}`, `[1, 2]`) or any serializable expression.
///
/// ```rust
/// use serde_json::json;
/// use tether_rpc_protocol::params;
///
/// let empty: Vec<serde_json::Value> = params![];
/// assert!(empty.is_empty());
///
/// let sku = "sku-1";
/// let list = params![sku, -2, null, {"nested": [true]}];
/// assert_eq!(list, vec![json!("sku-1"), json!(-2), json!(null), json!({"nested": [true]})]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::__private::Value>::new()
    };
    ($($param:tt)+) => {
        match $crate::__private::json!([$($param)+]) {
            $crate::__private::Value::Array(params) => params,
            other => ::std::vec![other],
        }
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn test_params_accepts_json_literals() {
        let params = params![null, {"k": 1}, [true, "x"]];
        assert_eq!(params, vec![json!(null), json!({"k": 1}), json!([true, "x"])]);
    }

    #[test]
    fn test_params_accepts_expressions() {
        let count = 3;
        let name = String::from("ada");
        let params = params![count + 1, name, -1.5, json!({"nested": null}),];
        assert_eq!(params, vec![json!(4), json!("ada"), json!(-1.5), json!({"nested": null})]);
    }

    #[test]
    fn test_single_array_param_stays_nested() {
        let params = params![[1, 2, 3]];
        assert_eq!(params, vec![json!([1, 2, 3])]);
    }
}

use serde_json::{Map, Value, json};

use crate::JSONRPC_VERSION;
use crate::error::{ErrorObject, MalformedResponse};

/// What a response envelope settled to: exactly one of `result` or `error`
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// The `result` member, which may itself be `null`
    Success(Value),
    /// The `error` member
    Failure(ErrorObject),
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success(_))
    }

    /// Convert into a `Result`, keeping the result value or the error object
    pub fn into_result(self) -> Result<Value, ErrorObject> {
        match self {
            ResponseOutcome::Success(value) => Ok(value),
            ResponseOutcome::Failure(error) => Err(error),
        }
    }
}

/// A validated JSON-RPC response envelope.
///
/// `result: null` counts as a present result. `id` and `jsonrpc` are carried
/// through as received; a missing `id` reads as `null` and a missing
/// `jsonrpc` as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub id: Value,
    pub jsonrpc: Option<String>,
    pub outcome: ResponseOutcome,
}

impl ResponseEnvelope {
    /// A 2.0 success envelope, for in-process transports and test doubles
    /// that answer without a server
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            outcome: ResponseOutcome::Success(result),
        }
    }

    /// A 2.0 failure envelope; see [`ResponseEnvelope::success`]
    pub fn failure(id: Value, error: ErrorObject) -> Self {
        Self {
            id,
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            outcome: ResponseOutcome::Failure(error),
        }
    }

    /// Validate a decoded response body
    pub fn from_value(body: Value) -> Result<Self, MalformedResponse> {
        let mut map = match body {
            Value::Object(map) => map,
            other => return Err(MalformedResponse::NotAnObject(json_type_name(&other))),
        };

        let result = map.remove("result");
        let error = map.remove("error");

        let outcome = match (result, error) {
            (Some(result), None) => ResponseOutcome::Success(result),
            (None, Some(error)) => ResponseOutcome::Failure(
                serde_json::from_value::<ErrorObject>(error)
                    .map_err(|e| MalformedResponse::InvalidErrorObject(e.to_string()))?,
            ),
            (None, None) => return Err(MalformedResponse::MissingOutcome),
            (Some(_), Some(_)) => return Err(MalformedResponse::AmbiguousOutcome),
        };

        let id = map.remove("id").unwrap_or(Value::Null);
        let jsonrpc = match map.remove("jsonrpc") {
            Some(Value::String(version)) => Some(version),
            _ => None,
        };

        Ok(Self {
            id,
            jsonrpc,
            outcome,
        })
    }

    /// Render the envelope back to its wire form, as a transport would hand it over
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), self.id.clone());
        if let Some(version) = &self.jsonrpc {
            map.insert("jsonrpc".to_string(), Value::String(version.clone()));
        }
        match &self.outcome {
            ResponseOutcome::Success(result) => {
                map.insert("result".to_string(), result.clone());
            }
            ResponseOutcome::Failure(error) => {
                map.insert("error".to_string(), json!(error));
            }
        }
        Value::Object(map)
    }

    /// Whether the envelope declares the JSON-RPC 2.0 version
    pub fn is_v2(&self) -> bool {
        self.jsonrpc.as_deref() == Some(JSONRPC_VERSION)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_extracts_result() {
        let envelope =
            ResponseEnvelope::from_value(json!({"id": 0, "jsonrpc": "2.0", "result": 42})).unwrap();

        assert!(envelope.is_v2());
        assert_eq!(envelope.id, json!(0));
        assert_eq!(envelope.outcome, ResponseOutcome::Success(json!(42)));
    }

    #[test]
    fn test_null_result_is_still_a_result() {
        let envelope = ResponseEnvelope::from_value(json!({"id": 0, "result": null})).unwrap();
        assert_eq!(envelope.outcome, ResponseOutcome::Success(Value::Null));
        assert_eq!(envelope.jsonrpc, None);
    }

    #[test]
    fn test_failure_preserves_error_object() {
        let envelope = ResponseEnvelope::from_value(json!({
            "id": 0,
            "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "Method not found", "data": ["Users::nope"]}
        }))
        .unwrap();

        let error = envelope.outcome.into_result().unwrap_err();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not found");
        assert_eq!(error.data, Some(json!(["Users::nope"])));
    }

    #[test]
    fn test_missing_outcome_is_malformed() {
        let err = ResponseEnvelope::from_value(json!({"id": 0, "jsonrpc": "2.0"})).unwrap_err();
        assert_eq!(err, MalformedResponse::MissingOutcome);
    }

    #[test]
    fn test_both_outcomes_is_malformed() {
        let err = ResponseEnvelope::from_value(json!({
            "id": 0,
            "result": 1,
            "error": {"code": 1, "message": "x"}
        }))
        .unwrap_err();
        assert_eq!(err, MalformedResponse::AmbiguousOutcome);
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        let err = ResponseEnvelope::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err, MalformedResponse::NotAnObject("array"));
    }

    #[test]
    fn test_invalid_error_object_is_malformed() {
        let err = ResponseEnvelope::from_value(json!({"error": {"code": "oops"}})).unwrap_err();
        assert!(matches!(err, MalformedResponse::InvalidErrorObject(_)));
    }

    #[test]
    fn test_to_value_matches_wire_shape() {
        let failure = ResponseEnvelope::failure(json!(0), ErrorObject::new(-32000, "busy", None));
        assert_eq!(
            failure.to_value(),
            json!({"id": 0, "jsonrpc": "2.0", "error": {"code": -32000, "message": "busy"}})
        );

        let success = ResponseEnvelope::success(json!(0), json!({"ok": true}));
        assert_eq!(
            success.to_value(),
            json!({"id": 0, "jsonrpc": "2.0", "result": {"ok": true}})
        );
    }
}

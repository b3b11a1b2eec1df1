use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::error_codes;

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64),      // -32099 to -32000
    ApplicationError(i64), // anything outside the reserved codes
}

impl ErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            error_codes::PARSE_ERROR => ErrorCode::ParseError,
            error_codes::INVALID_REQUEST => ErrorCode::InvalidRequest,
            error_codes::METHOD_NOT_FOUND => ErrorCode::MethodNotFound,
            error_codes::INVALID_PARAMS => ErrorCode::InvalidParams,
            error_codes::INTERNAL_ERROR => ErrorCode::InternalError,
            error_codes::SERVER_ERROR_START..=error_codes::SERVER_ERROR_END => {
                ErrorCode::ServerError(code)
            }
            other => ErrorCode::ApplicationError(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ErrorCode::ParseError => error_codes::PARSE_ERROR,
            ErrorCode::InvalidRequest => error_codes::INVALID_REQUEST,
            ErrorCode::MethodNotFound => error_codes::METHOD_NOT_FOUND,
            ErrorCode::InvalidParams => error_codes::INVALID_PARAMS,
            ErrorCode::InternalError => error_codes::INTERNAL_ERROR,
            ErrorCode::ServerError(code) | ErrorCode::ApplicationError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ServerError(_) => "Server error",
            ErrorCode::ApplicationError(_) => "Application error",
        }
    }

    /// Whether the code lies in the range the JSON-RPC 2.0 specification reserves
    pub fn is_reserved(&self) -> bool {
        !matches!(self, ErrorCode::ApplicationError(_))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// The `error` member of a failure response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    pub fn new(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    pub fn kind(&self) -> ErrorCode {
        ErrorCode::from_code(self.code)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON-RPC Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorObject {}

/// Ways a decoded response body can violate the response envelope shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("response body is not a JSON object (got {0})")]
    NotAnObject(&'static str),

    #[error("response has neither `result` nor `error`")]
    MissingOutcome,

    #[error("response has both `result` and `error`")]
    AmbiguousOutcome,

    #[error("response `error` member is not a valid error object: {0}")]
    InvalidErrorObject(String),

    #[error("response `result` does not match the expected type: {0}")]
    UnexpectedResult(String),
}

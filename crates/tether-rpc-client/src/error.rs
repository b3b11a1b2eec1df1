//! Error types for JSON-RPC client operations

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use tether_rpc_protocol::{ErrorCode, ErrorObject, MalformedResponse};

/// Result type for JSON-RPC client operations
pub type RpcClientResult<T> = Result<T, RpcClientError>;

/// Whatever a transport reports when an exchange fails, before normalization
pub type TransportFailure = Box<dyn StdError + Send + Sync + 'static>;

/// Longest response body kept on a normalized transport error
const MAX_BODY_EXCERPT: usize = 512;

/// Every way a call can be rejected
#[derive(Error, Debug)]
pub enum RpcClientError {
    /// The send/receive exchange itself failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with an `error` object
    #[error("Protocol error: {0}")]
    Protocol(ErrorObject),

    /// The decoded body is not a valid response envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] MalformedResponse),

    /// The request envelope could not be encoded
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RpcClientError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the JSON-RPC error code if the server rejected the call
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Protocol(error) => Some(error.code),
            _ => None,
        }
    }

    /// Classify the server's error code
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code().map(ErrorCode::from_code)
    }

    /// The server's error object, with `data` intact
    pub fn error_object(&self) -> Option<&ErrorObject> {
        match self {
            Self::Protocol(error) => Some(error),
            _ => None,
        }
    }

    /// The normalized transport failure, if the exchange failed
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}

impl From<ErrorObject> for RpcClientError {
    fn from(error: ErrorObject) -> Self {
        Self::Protocol(error)
    }
}

/// Broad category of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Could not reach the endpoint
    Connect,
    /// The transport gave up waiting
    Timeout,
    /// The endpoint answered with a non-success status
    Status,
    /// The response body could not be decoded
    Decode,
    /// Reading or writing the exchange failed
    Io,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Status => "status",
            TransportErrorKind::Decode => "decode",
            TransportErrorKind::Io => "io",
            TransportErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A transport failure reduced to plain data.
///
/// Built from the transport's own error at the dispatcher boundary. It holds
/// no handle to the original error, so it can be cloned, compared and
/// inspected any number of times with the same result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    status: Option<u16>,
    body: Option<String>,
    causes: Vec<String>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            causes: Vec::new(),
        }
    }

    /// A non-success HTTP status, with the body the endpoint sent
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            kind: TransportErrorKind::Status,
            message: format!("HTTP status {}", status),
            status: Some(status),
            body: Some(body.chars().take(MAX_BODY_EXCERPT).collect()),
            causes: Vec::new(),
        }
    }

    /// Normalize whatever a transport reported into a `TransportError`
    pub fn normalize(failure: TransportFailure) -> Self {
        let causes = cause_chain(&*failure);

        let failure = match failure.downcast::<TransportError>() {
            Ok(error) => return *error,
            Err(other) => other,
        };

        let failure = match failure.downcast::<HttpStatusError>() {
            Ok(error) => return Self::status(error.status, error.body).with_causes(causes),
            Err(other) => other,
        };

        #[cfg(feature = "http")]
        let failure = match failure.downcast::<reqwest::Error>() {
            Ok(error) => return Self::from_reqwest(&error).with_causes(causes),
            Err(other) => other,
        };

        let failure = match failure.downcast::<serde_json::Error>() {
            Ok(error) => {
                return Self::new(TransportErrorKind::Decode, error.to_string()).with_causes(causes);
            }
            Err(other) => other,
        };

        let (kind, message) = match failure.downcast::<std::io::Error>() {
            Ok(error) => (io_kind(&error), error.to_string()),
            Err(other) => (TransportErrorKind::Other, other.to_string()),
        };
        Self::new(kind, message).with_causes(causes)
    }

    #[cfg(feature = "http")]
    fn from_reqwest(error: &reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_decode() {
            TransportErrorKind::Decode
        } else if error.is_status() {
            TransportErrorKind::Status
        } else if error.is_body() || error.is_request() {
            TransportErrorKind::Io
        } else {
            TransportErrorKind::Other
        };

        Self {
            kind,
            message: error.to_string(),
            status: error.status().map(|status| status.as_u16()),
            body: None,
            causes: Vec::new(),
        }
    }

    fn with_causes(mut self, causes: Vec<String>) -> Self {
        self.causes = causes;
        self
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when the failure carried one
    pub fn http_status(&self) -> Option<u16> {
        self.status
    }

    /// Leading part of the response body, for status failures
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Messages of the underlying error's `source()` chain, outermost first
    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

/// A transport's way of reporting a non-success HTTP status
#[derive(Debug, Clone, Error)]
#[error("HTTP error {status}: {body}")]
pub struct HttpStatusError {
    pub status: u16,
    pub body: String,
}

fn cause_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    causes
}

fn io_kind(error: &std::io::Error) -> TransportErrorKind {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::TimedOut => TransportErrorKind::Timeout,
        ErrorKind::ConnectionRefused
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::NotConnected
        | ErrorKind::AddrNotAvailable => TransportErrorKind::Connect,
        _ => TransportErrorKind::Io,
    }
}

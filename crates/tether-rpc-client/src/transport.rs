//! Transport layer for the JSON-RPC client

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::{ClientConfig, HttpVerb};
use crate::error::TransportFailure;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::HttpTransport;

/// Transport type enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportType {
    /// Plain HTTP request/response
    Http,
    /// Anything supplied by the caller (in-process, test doubles, other protocols)
    Custom(String),
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportType::Http => write!(f, "HTTP"),
            TransportType::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// One outgoing exchange: where to send the serialized envelope and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub verb: HttpVerb,
    pub url: String,
    pub content_type: String,
    /// Data type the caller expects back
    pub accept: String,
    /// Serialized request envelope
    pub body: String,
}

impl TransportRequest {
    /// Address `body` according to `config`
    pub fn from_config(config: &ClientConfig, body: String) -> Self {
        Self {
            verb: config.verb,
            url: config.endpoint.clone(),
            content_type: config.content_type.clone(),
            accept: config.data_type.clone(),
            body,
        }
    }
}

/// Sends one serialized request and hands back the decoded response body.
///
/// Implementations take `&self` and are shared between concurrent calls.
/// Any failure (unreachable endpoint, non-success status, undecodable body)
/// is reported as a boxed error; the dispatcher normalizes it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Get transport type
    fn transport_type(&self) -> TransportType;

    /// Send a request and wait for the decoded response body
    async fn send(&self, request: TransportRequest) -> Result<Value, TransportFailure>;
}

/// Type alias for a shared transport
pub type SharedTransport = Arc<dyn Transport>;

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn transport_type(&self) -> TransportType {
        (**self).transport_type()
    }

    async fn send(&self, request: TransportRequest) -> Result<Value, TransportFailure> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transport_type(&self) -> TransportType {
        (**self).transport_type()
    }

    async fn send(&self, request: TransportRequest) -> Result<Value, TransportFailure> {
        (**self).send(request).await
    }
}

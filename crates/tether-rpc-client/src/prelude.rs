//! # Client Prelude
//!
//! Convenient re-exports of the most commonly used types and traits.
//!
//! ```rust
//! use tether_rpc_client::prelude::*;
//! ```

// Core client types
pub use crate::client::{RpcClient, RpcClientBuilder};
pub use crate::config::{ClientConfig, HttpVerb};
pub use crate::error::{RpcClientError, RpcClientResult, TransportError, TransportErrorKind};

// Transport types
pub use crate::transport::{Transport, TransportRequest, TransportType};

#[cfg(feature = "http")]
pub use crate::transport::HttpTransport;

// Wire types
pub use tether_rpc_protocol::{ErrorCode, ErrorObject, MalformedResponse, params};

pub use serde_json::{Value, json};

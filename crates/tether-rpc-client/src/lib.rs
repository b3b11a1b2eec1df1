//! # JSON-RPC Client Library
//!
//! An async JSON-RPC 2.0 client for calling procedures addressed as
//! `Target::method`. Each call builds one request envelope, sends it over a
//! [`Transport`], and settles exactly once with the response's `result` or a
//! normalized error.
//!
//! ## Features
//!
//! - **Pluggable transports**: HTTP via `reqwest`, or any [`Transport`] implementation
//! - **Immutable configuration**: endpoint, verb, content type and protocol version fixed at construction
//! - **Normalized errors**: transport, protocol and malformed-response failures in one [`RpcClientError`]
//! - **Independent calls**: concurrent calls share only read-only state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tether_rpc_client::{ClientConfig, RpcClient, params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::new(ClientConfig::new("http://localhost:8080/api/JsonRPC"))?;
//!
//!     let total = client.call("Cart", "total", params!["order-17"]).await?;
//!     println!("Cart total: {}", total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Request ids
//!
//! Every request carries `"id": 0`. Responses are not correlated by id, so a
//! transport must pair each response with the request that produced it.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod prelude;
pub mod transport;

// Re-export main types
pub use client::{RpcClient, RpcClientBuilder};
pub use config::{ClientConfig, HttpVerb, TransportOptions};
pub use dispatcher::CallDispatcher;
pub use error::{
    HttpStatusError, RpcClientError, RpcClientResult, TransportError, TransportErrorKind,
    TransportFailure,
};

// Re-export transport types
pub use transport::{SharedTransport, Transport, TransportRequest, TransportType};

// Re-export protocol types for convenience
pub use tether_rpc_protocol::{
    ErrorCode, ErrorObject, MalformedResponse, RequestEnvelope, ResponseEnvelope, ResponseOutcome,
    build_request, params,
};

//! Main JSON-RPC client implementation

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use tether_rpc_protocol::{MalformedResponse, build_request};

use crate::config::ClientConfig;
use crate::dispatcher::CallDispatcher;
use crate::error::{RpcClientError, RpcClientResult};
use crate::transport::{SharedTransport, Transport};

/// JSON-RPC client for `Target::method` calls.
///
/// Cloning is cheap: clones share the transport and the configuration.
#[derive(Debug, Clone)]
pub struct RpcClient {
    dispatcher: CallDispatcher,
}

impl RpcClient {
    /// Create a client that talks HTTP to `config.endpoint`
    #[cfg(feature = "http")]
    pub fn new(config: ClientConfig) -> RpcClientResult<Self> {
        config.validate()?;
        let transport = crate::transport::HttpTransport::new(&config)?;
        Ok(Self::build(Arc::new(transport), config))
    }

    /// Create a client over any transport
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> RpcClientResult<Self> {
        config.validate()?;
        Ok(Self::build(Arc::new(transport), config))
    }

    fn build(transport: SharedTransport, config: ClientConfig) -> Self {
        info!(
            endpoint = %config.endpoint,
            verb = %config.verb,
            transport = %transport.transport_type(),
            "JSON-RPC client created"
        );

        Self {
            dispatcher: CallDispatcher::new(transport, Arc::new(config)),
        }
    }

    /// Call `method` on `target` with positional `params`.
    ///
    /// To call `fizzBuzz` on the `FooBar` target with three parameters:
    ///
    /// ```rust,no_run
    /// # async fn demo(client: tether_rpc_client::RpcClient) -> tether_rpc_client::RpcClientResult<()> {
    /// use tether_rpc_client::params;
    ///
    /// let value = client.call("FooBar", "fizzBuzz", params![1, "two", [3]]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(
        &self,
        target: &str,
        method: &str,
        params: Vec<Value>,
    ) -> RpcClientResult<Value> {
        if target.is_empty() || method.is_empty() {
            return Err(RpcClientError::config(
                "target and method must be non-empty identifiers",
            ));
        }

        let envelope = build_request(target, method, params)
            .with_version(self.dispatcher.config().jsonrpc_version.as_str());
        self.dispatcher.dispatch(&envelope).await
    }

    /// Call and deserialize the result into `T`.
    ///
    /// A result that does not fit `T` is reported as a malformed response.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        target: &str,
        method: &str,
        params: Vec<Value>,
    ) -> RpcClientResult<T> {
        let value = self.call(target, method, params).await?;
        serde_json::from_value(value)
            .map_err(|e| MalformedResponse::UnexpectedResult(e.to_string()).into())
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// The underlying dispatcher, for sending prebuilt envelopes
    pub fn dispatcher(&self) -> &CallDispatcher {
        &self.dispatcher
    }
}

/// Builder for creating JSON-RPC clients
#[derive(Default)]
pub struct RpcClientBuilder {
    transport: Option<SharedTransport>,
    config: Option<ClientConfig>,
}

impl RpcClientBuilder {
    /// Create a new client builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set transport
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Set configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the endpoint, keeping every other setting
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let config = self.config.take().unwrap_or_default();
        self.config = Some(ClientConfig {
            endpoint: endpoint.into(),
            ..config
        });
        self
    }

    /// Build the client.
    ///
    /// Without an explicit transport, an HTTP transport is created from the
    /// configuration (requires the `http` feature).
    pub fn build(self) -> RpcClientResult<RpcClient> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let transport: SharedTransport = match self.transport {
            Some(transport) => transport,
            #[cfg(feature = "http")]
            None => Arc::new(crate::transport::HttpTransport::new(&config)?),
            #[cfg(not(feature = "http"))]
            None => {
                return Err(RpcClientError::config(
                    "Transport must be set when the http feature is disabled",
                ));
            }
        };

        Ok(RpcClient::build(transport, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpVerb;
    use crate::error::TransportFailure;
    use crate::transport::{TransportRequest, TransportType};
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    /// Echoes the request envelope back as the result
    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        fn transport_type(&self) -> TransportType {
            TransportType::Custom("echo".to_string())
        }

        async fn send(&self, request: TransportRequest) -> Result<Value, TransportFailure> {
            let envelope: Value = serde_json::from_str(&request.body)?;
            Ok(json!({"id": 0, "jsonrpc": "2.0", "result": envelope}))
        }
    }

    #[tokio::test]
    async fn test_call_sends_target_scoped_method() {
        let client =
            RpcClient::with_transport(ClientConfig::default(), EchoTransport).unwrap();

        let echoed = client
            .call("FooBar", "fizzBuzz", crate::params![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(echoed["method"], "FooBar::fizzBuzz");
        assert_eq!(echoed["params"], json!([1, 2, 3]));
        assert_eq!(echoed["id"], 0);
    }

    #[tokio::test]
    async fn test_configured_version_is_stamped() {
        let config = ClientConfig::default().with_version("2.0-draft");
        let client = RpcClient::with_transport(config, EchoTransport).unwrap();

        let echoed = client.call("Meta", "version", vec![]).await.unwrap();
        assert_eq!(echoed["jsonrpc"], "2.0-draft");
    }

    #[tokio::test]
    async fn test_empty_identifiers_rejected() {
        let client =
            RpcClient::with_transport(ClientConfig::default(), EchoTransport).unwrap();

        assert!(client.call("", "ping", vec![]).await.is_err());
        assert!(client.call("Health", "", vec![]).await.is_err());
    }

    #[tokio::test]
    async fn test_call_as_typed_result() {
        #[derive(Debug, Deserialize)]
        struct Echoed {
            method: String,
            params: Vec<u32>,
        }

        let client =
            RpcClient::with_transport(ClientConfig::default(), EchoTransport).unwrap();

        let echoed: Echoed = client
            .call_as("Sum", "of", vec![json!(4), json!(5)])
            .await
            .unwrap();
        assert_eq!(echoed.method, "Sum::of");
        assert_eq!(echoed.params, vec![4, 5]);

        let mismatch = client.call_as::<Vec<String>>("Sum", "of", vec![]).await;
        assert!(matches!(
            mismatch,
            Err(RpcClientError::MalformedResponse(MalformedResponse::UnexpectedResult(_)))
        ));
    }

    #[tokio::test]
    async fn test_client_builder() {
        let client = RpcClientBuilder::new()
            .with_config(ClientConfig::default().with_verb(HttpVerb::Put))
            .with_endpoint("http://rpc.internal:8080/api/JsonRPC")
            .with_transport(EchoTransport)
            .build()
            .unwrap();

        assert_eq!(client.config().endpoint, "http://rpc.internal:8080/api/JsonRPC");
        assert_eq!(client.config().verb, HttpVerb::Put);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = RpcClientBuilder::new()
            .with_endpoint("not a url")
            .with_transport(EchoTransport)
            .build();

        assert!(matches!(result, Err(RpcClientError::Config(_))));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_builder_defaults_to_http() {
        let client = RpcClientBuilder::new()
            .with_endpoint("http://localhost:8080/api/JsonRPC")
            .build()
            .unwrap();

        assert_eq!(client.dispatcher().transport().transport_type(), TransportType::Http);
    }
}

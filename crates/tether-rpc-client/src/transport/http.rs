//! HTTP transport implementation for the JSON-RPC client

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use crate::config::{ClientConfig, HttpVerb};
use crate::error::{HttpStatusError, RpcClientError, RpcClientResult, TransportFailure};
use crate::transport::{Transport, TransportRequest, TransportType};

/// HTTP transport backed by `reqwest`.
///
/// One request per call, no retries. The underlying client is cheap to share
/// between concurrent calls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: Client,
}

impl HttpTransport {
    /// Create a transport from the client configuration's transport hints.
    ///
    /// `https` endpoints need the `tls` feature; without it they are refused
    /// here rather than failing on every send.
    pub fn new(config: &ClientConfig) -> RpcClientResult<Self> {
        let endpoint = config.endpoint_url()?;
        if endpoint.scheme() == "https" && !cfg!(feature = "tls") {
            return Err(RpcClientError::config(format!(
                "HTTPS endpoint '{}' requires the `tls` feature",
                config.endpoint
            )));
        }

        let mut builder = Client::builder().default_headers(default_headers(config)?);

        if let Some(timeout) = config.transport.request_timeout {
            builder = builder.timeout(timeout);
        }
        let user_agent = config
            .transport
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("tether-rpc-client/{}", env!("CARGO_PKG_VERSION")));

        let client = builder
            .user_agent(user_agent)
            .build()
            .map_err(|e| RpcClientError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create HTTP transport with custom client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn default_headers(config: &ClientConfig) -> RpcClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.transport.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RpcClientError::config(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RpcClientError::config(format!("Invalid header value for '{}': {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn method_for(verb: HttpVerb) -> Method {
    match verb {
        HttpVerb::Get => Method::GET,
        HttpVerb::Post => Method::POST,
        HttpVerb::Put => Method::PUT,
        HttpVerb::Patch => Method::PATCH,
        HttpVerb::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn transport_type(&self) -> TransportType {
        TransportType::Http
    }

    async fn send(&self, request: TransportRequest) -> Result<Value, TransportFailure> {
        let start_time = Instant::now();

        debug!(
            verb = %request.verb,
            url = %request.url,
            bytes = request.body.len(),
            "Sending HTTP request"
        );

        let response = self
            .client
            .request(method_for(request.verb), &request.url)
            .header(CONTENT_TYPE, &request.content_type)
            .header(ACCEPT, &request.accept)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "HTTP response received"
        );

        if !status.is_success() {
            return Err(Box::new(HttpStatusError {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }));
        }

        Ok(serde_json::from_slice::<Value>(&bytes)?)
    }
}

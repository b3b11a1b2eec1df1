//! Configuration types for the JSON-RPC client

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::{RpcClientError, RpcClientResult};

/// Main client configuration.
///
/// Fixed when the client is built and shared read-only by every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// The RPC endpoint to hit
    pub endpoint: String,

    /// Version string stamped on every request envelope
    pub jsonrpc_version: String,

    /// HTTP verb used to send the envelope
    pub verb: HttpVerb,

    /// `Content-Type` of the request body
    pub content_type: String,

    /// Data type expected back, sent as the `Accept` header
    pub data_type: String,

    /// Hints for the transport
    pub transport: TransportOptions,
}

/// HTTP verbs the transport may be asked to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TransportOptions {
    /// Request timeout enforced by the transport. `None` waits indefinitely.
    #[serde(with = "option_duration_serde")]
    pub request_timeout: Option<Duration>,

    /// User agent string
    pub user_agent: Option<String>,

    /// Custom headers to include in requests
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/api/JsonRPC".to_string(),
            jsonrpc_version: tether_rpc_protocol::JSONRPC_VERSION.to_string(),
            verb: HttpVerb::Post,
            content_type: "application/json; charset=utf-8".to_string(),
            data_type: "application/json".to_string(),
            transport: TransportOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.jsonrpc_version = version.into();
        self
    }

    pub fn with_verb(mut self, verb: HttpVerb) -> Self {
        self.verb = verb;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.transport.request_timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.transport.headers.insert(name.into(), value.into());
        self
    }

    /// Parse the endpoint, rejecting anything that is not absolute http(s)
    pub fn endpoint_url(&self) -> RpcClientResult<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            RpcClientError::config(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RpcClientError::config(format!(
                "Invalid scheme for endpoint: {}",
                url.scheme()
            )));
        }

        Ok(url)
    }

    /// Check the configuration before a client is built from it
    pub fn validate(&self) -> RpcClientResult<()> {
        self.endpoint_url()?;

        if self.jsonrpc_version.trim().is_empty() {
            return Err(RpcClientError::config("JSON-RPC version must not be empty"));
        }
        if self.content_type.trim().is_empty() {
            return Err(RpcClientError::config("Content type must not be empty"));
        }
        if self.transport.request_timeout == Some(Duration::ZERO) {
            return Err(RpcClientError::config("Request timeout must be greater than zero"));
        }

        Ok(())
    }
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpVerb {
    type Err = RpcClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpVerb::Get),
            "POST" => Ok(HttpVerb::Post),
            "PUT" => Ok(HttpVerb::Put),
            "PATCH" => Ok(HttpVerb::Patch),
            "DELETE" => Ok(HttpVerb::Delete),
            other => Err(RpcClientError::config(format!("Unsupported HTTP verb: {}", other))),
        }
    }
}

// Durations travel as milliseconds
mod option_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(duration) => {
                let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
                serializer.serialize_some(&millis)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}

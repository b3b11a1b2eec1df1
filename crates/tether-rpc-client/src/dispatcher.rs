//! Call dispatch: serialize, send, settle

use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, debug_span, warn};

use tether_rpc_protocol::{RequestEnvelope, ResponseEnvelope, ResponseOutcome};

use crate::config::ClientConfig;
use crate::error::{RpcClientError, RpcClientResult, TransportError};
use crate::transport::{SharedTransport, TransportRequest};

/// Sends request envelopes over a transport and settles each call once.
///
/// Holds only shared, read-only state; clones are cheap and concurrent
/// dispatches never wait on each other.
#[derive(Clone)]
pub struct CallDispatcher {
    transport: SharedTransport,
    config: Arc<ClientConfig>,
}

impl CallDispatcher {
    pub fn new(transport: SharedTransport, config: Arc<ClientConfig>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// Dispatch one request envelope.
    ///
    /// Resolves with the response's `result` member; rejects with a transport,
    /// protocol or malformed-response error. The returned future is the
    /// pending call: dropping it abandons the outcome but not the exchange
    /// already handed to the transport.
    pub async fn dispatch(&self, envelope: &RequestEnvelope) -> RpcClientResult<Value> {
        let span = debug_span!("rpc_call", method = %envelope.method);
        self.dispatch_inner(envelope).instrument(span).await
    }

    async fn dispatch_inner(&self, envelope: &RequestEnvelope) -> RpcClientResult<Value> {
        let body = serde_json::to_string(envelope)?;
        let request = TransportRequest::from_config(&self.config, body);

        debug!(
            transport = %self.transport.transport_type(),
            params = envelope.params.len(),
            "Dispatching request"
        );

        let response = match self.transport.send(request).await {
            Ok(body) => body,
            Err(failure) => {
                let error = TransportError::normalize(failure);
                warn!(kind = %error.kind(), error = %error, "Call rejected by transport");
                return Err(error.into());
            }
        };

        settle(response)
    }
}

/// Map a decoded response body onto the call's outcome
pub(crate) fn settle(body: Value) -> RpcClientResult<Value> {
    let envelope = ResponseEnvelope::from_value(body).map_err(|e| {
        warn!(error = %e, "Call rejected: malformed response");
        RpcClientError::MalformedResponse(e)
    })?;

    if !envelope.is_v2() {
        debug!(jsonrpc = ?envelope.jsonrpc, "Response does not declare JSON-RPC 2.0");
    }

    match envelope.outcome {
        ResponseOutcome::Success(result) => {
            debug!("Call resolved");
            Ok(result)
        }
        ResponseOutcome::Failure(error) => {
            warn!(code = error.code, message = %error.message, "Call rejected with protocol error");
            Err(RpcClientError::Protocol(error))
        }
    }
}

impl std::fmt::Debug for CallDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallDispatcher")
            .field("transport", &self.transport.transport_type())
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}

//! Shared stubs for the integration tests: in-process transports that answer
//! without a server.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tether_rpc_client::{
    ErrorObject, ResponseEnvelope, Transport, TransportFailure, TransportRequest, TransportType,
};

/// Initialize logging once for a test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

type FailureFactory = Box<dyn Fn() -> TransportFailure + Send + Sync>;

enum Reply {
    Body(Value),
    Fail(FailureFactory),
}

/// Transport stub with one fixed reply and an optional delay
pub struct StubTransport {
    reply: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_body: Mutex<Option<String>>,
}

impl StubTransport {
    /// Succeed with `body` as the decoded response
    pub fn body(body: Value) -> Self {
        Self::new(Reply::Body(body))
    }

    /// Answer with a 2.0 success envelope carrying `result`
    pub fn result(result: Value) -> Self {
        Self::body(ResponseEnvelope::success(Value::from(0), result).to_value())
    }

    /// Answer with a 2.0 failure envelope carrying `error`
    pub fn error(error: ErrorObject) -> Self {
        Self::body(ResponseEnvelope::failure(Value::from(0), error).to_value())
    }

    /// Fail every exchange with whatever `factory` builds
    pub fn failing(factory: impl Fn() -> TransportFailure + Send + Sync + 'static) -> Self {
        Self::new(Reply::Fail(Box::new(factory)))
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            last_body: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The last serialized envelope this stub was handed
    pub fn last_body(&self) -> Option<Value> {
        let body = self.last_body.lock().unwrap().clone()?;
        serde_json::from_str(&body).ok()
    }
}

#[async_trait]
impl Transport for StubTransport {
    fn transport_type(&self) -> TransportType {
        TransportType::Custom("stub".to_string())
    }

    async fn send(&self, request: TransportRequest) -> Result<Value, TransportFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_body.lock().unwrap() = Some(request.body);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Fail(factory) => Err(factory()),
        }
    }
}

/// Routes each call to a stub keyed by its wire method (`Target::method`)
#[derive(Default)]
pub struct RoutingTransport {
    routes: HashMap<String, Arc<StubTransport>>,
}

impl RoutingTransport {
    /// Answer `method` with `stub`; pass an `Arc` to inspect the stub afterwards
    pub fn route(mut self, method: &str, stub: impl Into<Arc<StubTransport>>) -> Self {
        self.routes.insert(method.to_string(), stub.into());
        self
    }
}

#[async_trait]
impl Transport for RoutingTransport {
    fn transport_type(&self) -> TransportType {
        TransportType::Custom("routing".to_string())
    }

    async fn send(&self, request: TransportRequest) -> Result<Value, TransportFailure> {
        let envelope: Value = serde_json::from_str(&request.body)?;
        let method = envelope["method"].as_str().unwrap_or_default().to_string();

        match self.routes.get(&method) {
            Some(stub) => stub.send(request).await,
            None => Err(format!("no route for {}", method).into()),
        }
    }
}

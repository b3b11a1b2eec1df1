//! Command-line JSON-RPC caller
//!
//! Sends one `Target::method` call and prints the result as pretty JSON.
//!
//! ```text
//! cargo run --example tether-call -- --endpoint http://localhost:8080/api/JsonRPC FooBar fizzBuzz 1 '"two"' '[3]'
//! ```
//!
//! Each parameter is parsed as JSON; anything that does not parse is sent as
//! a JSON string.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::time::Duration;
use tether_rpc_client::{ClientConfig, HttpVerb, RpcClient, RpcClientError};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tether-call")]
#[command(about = "Call a Target::method over JSON-RPC 2.0", long_about = None)]
struct Args {
    /// RPC endpoint URL
    #[arg(short, long, default_value = "http://localhost/api/JsonRPC")]
    endpoint: String,

    /// HTTP verb
    #[arg(long, default_value = "POST")]
    verb: HttpVerb,

    /// Request timeout in milliseconds (none by default)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Target identifier, e.g. `FooBar`
    target: String,

    /// Method name on the target, e.g. `fizzBuzz`
    method: String,

    /// Positional parameters, each parsed as JSON
    params: Vec<String>,
}

fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::new(&args.endpoint).with_verb(args.verb);
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_request_timeout(Duration::from_millis(timeout_ms));
    }

    let client = RpcClient::new(config).context("invalid client configuration")?;
    let params: Vec<Value> = args.params.iter().map(|raw| parse_param(raw)).collect();

    info!(target_name = %args.target, method = %args.method, params = params.len(), "Calling");

    match client.call(&args.target, &args.method, params).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(RpcClientError::Protocol(error)) => {
            let data = error
                .data
                .as_ref()
                .map(|data| format!(" ({})", data))
                .unwrap_or_default();
            anyhow::bail!("server error {}: {}{}", error.code, error.message, data)
        }
        Err(error) => Err(error).context("call failed"),
    }
}

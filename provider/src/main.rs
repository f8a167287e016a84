//! Infoblox Provider
//!
//! Serves the Infoblox IPv4/IPv6 network data sources.
//!
//! One read request is taken from stdin as
//! `{"data_source": "infoblox_ipv4_network", "filters": {...}}` and the
//! resulting state (`id` and `results`) is written to stdout. A failed
//! read writes `{"diagnostics": [...]}` instead and exits non-zero.

mod config;
mod datasources;
mod error;
mod filters;
mod provider;

use crate::config::ProviderConfig;
use anyhow::{Context, Result};
use plugin_sdk::{diag_from_err, SdkError};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::io::Read;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// A single data source read requested by the host
#[derive(Debug, Deserialize)]
struct ReadRequest {
    data_source: String,
    #[serde(default)]
    filters: Map<String, Value>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the result only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Infoblox provider");

    let config = ProviderConfig::from_env()?;

    info!("Configuration:");
    info!("  Server: {}:{}", config.server, config.port);
    info!("  WAPI version: {}", config.wapi_version);
    info!("  SSL verify: {}", config.sslmode);

    let connector = config.connector()?;
    info!("  WAPI endpoint: {}", connector.base_url());

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading read request from stdin")?;
    let request: ReadRequest = serde_json::from_str(&input).context("parsing read request")?;

    let mut data_config = Map::new();
    data_config.insert("filters".to_string(), Value::Object(request.filters));

    let data = match provider::provider()
        .read_data_source(&request.data_source, data_config, &connector)
        .await
    {
        Ok(data) => data,
        Err(e) => {
            error!("Read of {} failed: {}", request.data_source, e);
            println!("{}", serde_json::to_string_pretty(&failure_report(&e))?);
            return Err(error::ProviderError::from(e).into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&data.state())?);

    Ok(())
}

/// Diagnostics of a failed read, as written to stdout
fn failure_report(err: &SdkError) -> Value {
    let diags = match err {
        SdkError::Diagnostics(diags) => diags.clone(),
        other => diag_from_err(other),
    };
    json!({ "diagnostics": diags })
}

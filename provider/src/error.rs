//! Provider error types.

use infoblox_client::InfobloxError;
use plugin_sdk::SdkError;
use thiserror::Error;

/// Errors that can occur while configuring the provider or running a read.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Infoblox API error
    #[error("Infoblox error: {0}")]
    Infoblox(#[from] InfobloxError),

    /// Schema validation or read diagnostics
    #[error("{0}")]
    Sdk(#[from] SdkError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

//! Data sources exposed by the provider

pub mod network;

use infoblox_client::InfobloxConnector;

/// Provider meta handed to every read: the configured WAPI connector
pub type Connector = dyn InfobloxConnector;

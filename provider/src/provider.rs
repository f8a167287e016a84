//! Provider definition: configuration schema and registered data sources

use crate::config::provider_schema;
use crate::datasources::network::{data_source_ipv4_network, data_source_ipv6_network};
use crate::datasources::Connector;
use plugin_sdk::Provider;

pub fn provider() -> Provider<Connector> {
    Provider::new(provider_schema())
        .with_data_source("infoblox_ipv4_network", data_source_ipv4_network())
        .with_data_source("infoblox_ipv6_network", data_source_ipv6_network())
}

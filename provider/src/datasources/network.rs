//! IPv4/IPv6 network data sources
//!
//! Both families share one schema; only the WAPI object and the
//! flattening differ. IPv6 networks report `-1` for utilization and the
//! availability estimate because the appliance does not compute them.

use super::Connector;
use crate::filters::filter_from_map;
use infoblox_client::{Ipv4Network, Ipv6Network, QueryParams, WapiObject};
use ipnetwork::Ipv4Network as Ipv4Cidr;
use plugin_sdk::{
    diag_from_err, Diagnostics, ReadContext, Resource, ResourceData, Schema, SchemaMap,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Network view used when a result carries none
pub const DEFAULT_NET_VIEW: &str = "default";

/// Placeholder for statistics the appliance does not report for IPv6
const UNSUPPORTED: i64 = -1;

/// Schema shared by `infoblox_ipv4_network` and `infoblox_ipv6_network`
pub fn data_source_network() -> Resource<Connector> {
    let mut elem = SchemaMap::new();
    elem.insert("id".to_string(), Schema::string().computed());
    elem.insert(
        "network_view".to_string(),
        Schema::string().optional().default_value(DEFAULT_NET_VIEW),
    );
    elem.insert("cidr".to_string(), Schema::string().computed());
    elem.insert(
        "comment".to_string(),
        Schema::string().computed().description("A string describing the network"),
    );
    elem.insert(
        "ext_attrs".to_string(),
        Schema::string().computed().description(
            "The Extensible attributes for network datasource, as a map in JSON format",
        ),
    );
    elem.insert(
        "utilization".to_string(),
        Schema::int().computed().description(
            "The percentage based on the IP addresses in use divided by the total addresses \
             in the network",
        ),
    );
    elem.insert(
        "est_available_ip".to_string(),
        Schema::int()
            .computed()
            .description("Total unused IP addresses in the network."),
    );

    let mut schema = SchemaMap::new();
    schema.insert("filters".to_string(), Schema::map().required());
    schema.insert(
        "results".to_string(),
        Schema::list_of(elem)
            .computed()
            .description("List of networks matching filters."),
    );

    Resource::new(schema)
}

pub fn data_source_ipv4_network() -> Resource<Connector> {
    let mut resource = data_source_network();
    resource.read = Some(Arc::new(Ipv4NetworkRead));
    resource
}

pub fn data_source_ipv6_network() -> Resource<Connector> {
    let mut resource = data_source_network();
    resource.read = Some(Arc::new(Ipv6NetworkRead));
    resource
}

/// Reader for `infoblox_ipv4_network`
pub struct Ipv4NetworkRead;

/// Reader for `infoblox_ipv6_network`
pub struct Ipv6NetworkRead;

#[async_trait::async_trait]
impl ReadContext<Connector> for Ipv4NetworkRead {
    async fn read(&self, data: &mut ResourceData, meta: &Connector) -> Diagnostics {
        let mut obj = Ipv4Network::new();
        obj.add_return_field("extattrs");
        let query = query_params(data);

        let networks = match meta.get_ipv4_networks(&obj, &query).await {
            Ok(Some(networks)) => networks,
            Ok(None) => return diag_from_err("API returns a nil/empty ID for the network"),
            Err(e) => return diag_from_err(format!("getting network failed: {}", e)),
        };

        let mut diags = Diagnostics::new();
        let mut results = Vec::with_capacity(networks.len());
        for network in &networks {
            if network.network.is_none() {
                diags.warn(format!(
                    "network {} has no CIDR, est_available_ip not computed",
                    network.reference
                ));
            }
            match flatten_ipv4_network(network) {
                Ok(flat) => results.push(Value::Object(flat)),
                Err(e) => return diag_from_err(format!("failed to flatten network: {}", e)),
            }
        }

        info!("Read {} IPv4 networks", results.len());
        store_results(data, results, diags)
    }
}

#[async_trait::async_trait]
impl ReadContext<Connector> for Ipv6NetworkRead {
    async fn read(&self, data: &mut ResourceData, meta: &Connector) -> Diagnostics {
        let mut obj = Ipv6Network::new();
        obj.add_return_field("extattrs");
        let query = query_params(data);

        let networks = match meta.get_ipv6_networks(&obj, &query).await {
            Ok(Some(networks)) => networks,
            Ok(None) => return diag_from_err("API returns a nil/empty ID for the network"),
            Err(e) => return diag_from_err(format!("getting network failed: {}", e)),
        };

        let mut results = Vec::with_capacity(networks.len());
        for network in &networks {
            match flatten_ipv6_network(network) {
                Ok(flat) => results.push(Value::Object(flat)),
                Err(e) => return diag_from_err(format!("failed to flatten network: {}", e)),
            }
        }

        info!("Read {} IPv6 networks", results.len());
        store_results(data, results, Diagnostics::new())
    }
}

fn query_params(data: &ResourceData) -> QueryParams {
    let filters = data.get_map("filters").unwrap_or_default();
    QueryParams::new(false, filter_from_map(&filters))
}

/// Write `results` and stamp the read with a synthetic id.
///
/// The data source has no natural key, so the id is the read time in
/// Unix seconds and changes on every read.
fn store_results(data: &mut ResourceData, results: Vec<Value>, diags: Diagnostics) -> Diagnostics {
    if let Err(e) = data.set("results", Value::Array(results)) {
        return diag_from_err(e);
    }
    data.set_id(chrono::Utc::now().timestamp().to_string());
    diags
}

fn ext_attrs_json(ea: &infoblox_client::Ea) -> Result<String, serde_json::Error> {
    serde_json::to_string(ea.as_map())
}

/// Flatten an IPv4 network into a `results` element
pub fn flatten_ipv4_network(
    network: &Ipv4Network,
) -> Result<Map<String, Value>, serde_json::Error> {
    let mut res = Map::new();
    res.insert("id".to_string(), Value::from(network.reference.clone()));
    res.insert("network_view".to_string(), Value::from(network.network_view.clone()));
    res.insert("ext_attrs".to_string(), Value::from(ext_attrs_json(&network.ea)?));
    res.insert("utilization".to_string(), Value::from(network.utilization));

    if let Some(cidr) = &network.network {
        res.insert("cidr".to_string(), Value::from(cidr.clone()));
        res.insert(
            "est_available_ip".to_string(),
            Value::from(calculate_available_ipv4s(cidr, network.utilization)),
        );
    }

    if let Some(comment) = &network.comment {
        res.insert("comment".to_string(), Value::from(comment.clone()));
    }

    Ok(res)
}

/// Flatten an IPv6 network into a `results` element
pub fn flatten_ipv6_network(
    network: &Ipv6Network,
) -> Result<Map<String, Value>, serde_json::Error> {
    let mut res = Map::new();
    res.insert("id".to_string(), Value::from(network.reference.clone()));
    res.insert("network_view".to_string(), Value::from(network.network_view.clone()));
    res.insert("ext_attrs".to_string(), Value::from(ext_attrs_json(&network.ea)?));
    res.insert("utilization".to_string(), Value::from(UNSUPPORTED));

    if let Some(cidr) = &network.network {
        res.insert("cidr".to_string(), Value::from(cidr.clone()));
        res.insert("est_available_ip".to_string(), Value::from(UNSUPPORTED));
    }

    if let Some(comment) = &network.comment {
        res.insert("comment".to_string(), Value::from(comment.clone()));
    }

    Ok(res)
}

/// Estimate available addresses of an IPv4 network.
///
/// `floor(utilization / 1000 * (2^(32 - prefix) - 2))`, where the host
/// count is 0 for /31 and /32. Utilization above 1000 is treated as 1000.
/// Returns 0 when `cidr` is not an IPv4 CIDR.
pub fn calculate_available_ipv4s(cidr: &str, utilization: u32) -> i64 {
    let Ok(net) = cidr.parse::<Ipv4Cidr>() else {
        return 0;
    };

    let host_bits = 32 - u32::from(net.prefix());
    let total = (1u64 << host_bits).saturating_sub(2);
    let per_mille = u64::from(utilization.min(1000));

    i64::try_from(per_mille * total / 1000).unwrap_or(i64::MAX)
}

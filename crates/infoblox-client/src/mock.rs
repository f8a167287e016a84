//! Mock InfobloxClient for unit testing
//!
//! This module provides a mock implementation of InfobloxConnector that can be used
//! in unit tests without requiring a running Grid Master.

use crate::common::query::QueryParams;
use crate::error::InfobloxError;
use crate::infoblox_trait::InfobloxConnector;
use crate::models::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock InfobloxClient for testing
///
/// Networks are held in memory and filtered by the search fields the
/// data sources send. The last query is recorded for assertions.
#[derive(Clone)]
pub struct MockInfobloxClient {
    ipv4_networks: Arc<Mutex<Vec<Ipv4Network>>>,
    ipv6_networks: Arc<Mutex<Vec<Ipv6Network>>>,
    // Error message returned by every read while set
    failure: Arc<Mutex<Option<String>>>,
    // Answer with no list at all (a JSON `null` body)
    null_response: Arc<Mutex<bool>>,
    last_query: Arc<Mutex<Option<(Vec<String>, QueryParams)>>>,
}

impl Default for MockInfobloxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInfobloxClient {
    /// Create a new mock client
    pub fn new() -> Self {
        Self {
            ipv4_networks: Arc::new(Mutex::new(Vec::new())),
            ipv6_networks: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            null_response: Arc::new(Mutex::new(false)),
            last_query: Arc::new(Mutex::new(None)),
        }
    }

    /// Add an IPv4 network to the mock store (for test setup)
    pub fn add_ipv4_network(&self, network: Ipv4Network) {
        self.ipv4_networks.lock().unwrap().push(network);
    }

    /// Add an IPv6 network to the mock store (for test setup)
    pub fn add_ipv6_network(&self, network: Ipv6Network) {
        self.ipv6_networks.lock().unwrap().push(network);
    }

    /// Make every read fail with a WAPI error
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    /// Make every read answer with a `null` body
    pub fn respond_null(&self) {
        *self.null_response.lock().unwrap() = true;
    }

    /// Return fields and query parameters of the last read
    pub fn last_query(&self) -> Option<(Vec<String>, QueryParams)> {
        self.last_query.lock().unwrap().clone()
    }

    fn record(
        &self,
        return_fields: &[String],
        query: &QueryParams,
    ) -> Result<bool, InfobloxError> {
        *self.last_query.lock().unwrap() = Some((return_fields.to_vec(), query.clone()));
        if let Some(message) = self.failure.lock().unwrap().as_ref() {
            return Err(InfobloxError::Api(message.clone()));
        }
        Ok(*self.null_response.lock().unwrap())
    }
}

/// Whether a network matches every search field.
///
/// `*Name` matches an extensible attribute; unknown fields are ignored.
fn matches(
    query: &QueryParams,
    network_view: &str,
    network: Option<&str>,
    comment: Option<&str>,
    ea: &Ea,
) -> bool {
    query.search_fields.iter().all(|(key, expected)| match key.as_str() {
        "network_view" => network_view == expected,
        "network" => network == Some(expected.as_str()),
        "comment" => comment == Some(expected.as_str()),
        attr if attr.starts_with('*') => match ea.get(&attr[1..]) {
            Some(Value::String(s)) => s == expected,
            Some(other) => other.to_string() == *expected,
            None => false,
        },
        _ => true,
    })
}

#[async_trait::async_trait]
impl InfobloxConnector for MockInfobloxClient {
    async fn get_ipv4_networks(
        &self,
        obj: &Ipv4Network,
        query: &QueryParams,
    ) -> Result<Option<Vec<Ipv4Network>>, InfobloxError> {
        if self.record(obj.return_fields(), query)? {
            return Ok(None);
        }
        let networks = self.ipv4_networks.lock().unwrap();
        Ok(Some(
            networks
                .iter()
                .filter(|n| {
                    matches(
                        query,
                        &n.network_view,
                        n.network.as_deref(),
                        n.comment.as_deref(),
                        &n.ea,
                    )
                })
                .cloned()
                .collect(),
        ))
    }

    async fn get_ipv6_networks(
        &self,
        obj: &Ipv6Network,
        query: &QueryParams,
    ) -> Result<Option<Vec<Ipv6Network>>, InfobloxError> {
        if self.record(obj.return_fields(), query)? {
            return Ok(None);
        }
        let networks = self.ipv6_networks.lock().unwrap();
        Ok(Some(
            networks
                .iter()
                .filter(|n| {
                    matches(
                        query,
                        &n.network_view,
                        n.network.as_deref(),
                        n.comment.as_deref(),
                        &n.ea,
                    )
                })
                .cloned()
                .collect(),
        ))
    }
}

//! InfobloxConnector trait for mocking
//!
//! This trait abstracts the InfobloxClient so data sources can be tested
//! against `MockInfobloxClient` instead of a live Grid Master.

use crate::common::query::QueryParams;
use crate::error::InfobloxError;
use crate::models::{Ipv4Network, Ipv6Network};

/// Object reads used by the provider data sources
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
/// A `None` result means the appliance answered with no list at all.
#[async_trait::async_trait]
pub trait InfobloxConnector: Send + Sync {
    async fn get_ipv4_networks(
        &self,
        obj: &Ipv4Network,
        query: &QueryParams,
    ) -> Result<Option<Vec<Ipv4Network>>, InfobloxError>;

    async fn get_ipv6_networks(
        &self,
        obj: &Ipv6Network,
        query: &QueryParams,
    ) -> Result<Option<Vec<Ipv6Network>>, InfobloxError>;
}

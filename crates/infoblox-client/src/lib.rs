//! Infoblox WAPI Client
//!
//! A Rust client library for reading objects from the Infoblox WAPI.
//! Provides typed network models and a generic object-fetch call.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use infoblox_client::{HostConfig, InfobloxClient, Ipv4Network, QueryParams, TransportConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InfobloxClient::new(
//!     HostConfig {
//!         host: "gridmaster.example.com".to_string(),
//!         port: "443".to_string(),
//!         version: "2.7".to_string(),
//!         username: "admin".to_string(),
//!         password: "infoblox".to_string(),
//!     },
//!     TransportConfig::default(),
//! )?;
//!
//! let mut filters = BTreeMap::new();
//! filters.insert("network_view".to_string(), "default".to_string());
//! let query = QueryParams::new(false, filters);
//!
//! let networks: Option<Vec<Ipv4Network>> =
//!     client.get_object(&Ipv4Network::new(), None, &query).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod infoblox_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{HostConfig, InfobloxClient, TransportConfig};
pub use common::query::QueryParams;
pub use common::HttpClient;
pub use error::InfobloxError;
pub use models::*;
pub use infoblox_trait::InfobloxConnector;
#[cfg(feature = "test-util")]
pub use mock::MockInfobloxClient;

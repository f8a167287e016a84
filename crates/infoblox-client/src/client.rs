//! Infoblox WAPI client
//!
//! Implements object reads against the WAPI REST endpoint:
//! `https://<host>:<port>/wapi/v<version>/<object type>`

use crate::common::query::QueryParams;
use crate::common::HttpClient;
use crate::error::InfobloxError;
use crate::infoblox_trait::InfobloxConnector;
use crate::models::*;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Grid Master address and credentials
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Host name or address. A value carrying an `http://`/`https://` scheme is used as is.
    pub host: String,
    pub port: String,
    /// WAPI version, e.g. "2.7"
    pub version: String,
    pub username: String,
    pub password: String,
}

/// Connection behaviour of the underlying HTTP client
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Verify the appliance TLS certificate
    pub ssl_verify: bool,
    /// Per-request timeout; `None` waits indefinitely
    pub http_request_timeout: Option<Duration>,
    /// Maximum idle connections kept per host
    pub http_pool_connections: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ssl_verify: false,
            http_request_timeout: Some(Duration::from_secs(60)),
            http_pool_connections: 10,
        }
    }
}

/// Infoblox WAPI client
pub struct InfobloxClient {
    http: HttpClient,
}

impl InfobloxClient {
    /// Create a new Infoblox client
    ///
    /// # Arguments
    /// * `host` - Grid Master address, WAPI version and credentials
    /// * `transport` - TLS verification, timeout and pool size
    pub fn new(host: HostConfig, transport: TransportConfig) -> Result<Self, InfobloxError> {
        if host.host.is_empty() {
            return Err(InfobloxError::InvalidRequest("host must not be empty".to_string()));
        }
        if host.version.is_empty() {
            return Err(InfobloxError::InvalidRequest("WAPI version must not be empty".to_string()));
        }

        let mut builder = Client::builder()
            .pool_max_idle_per_host(transport.http_pool_connections)
            .danger_accept_invalid_certs(!transport.ssl_verify);
        if let Some(timeout) = transport.http_request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(InfobloxError::Http)?;

        let base_url = wapi_base_url(&host);
        debug!("Infoblox WAPI endpoint: {}", base_url);

        Ok(Self {
            http: HttpClient::new(client, base_url, host.username, host.password),
        })
    }

    /// Get the WAPI base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Fetch objects of the type described by `obj`
    ///
    /// When `reference` is given the single referenced object is read and
    /// returned as a one-element list; otherwise the object type is searched
    /// with `query`. A JSON `null` body yields `Ok(None)`.
    ///
    /// # Returns
    /// * `Ok(Some(Vec<T>))` - Matching objects (possibly empty)
    /// * `Err(InfobloxError)` - If the request fails
    pub async fn get_object<T: WapiObject>(
        &self,
        obj: &T,
        reference: Option<&str>,
        query: &QueryParams,
    ) -> Result<Option<Vec<T>>, InfobloxError> {
        let pairs = query.to_pairs(obj.return_fields());
        let query_string = self.http.build_query_string(&pairs);

        let path = match reference {
            Some(reference) if !reference.is_empty() => reference.to_string(),
            _ => obj.object_type().to_string(),
        };
        let url = if query_string.is_empty() {
            path
        } else {
            format!("{}?{}", path, query_string)
        };

        debug!("Fetching {} objects from Infoblox", obj.object_type());

        match reference {
            Some(reference) if !reference.is_empty() => {
                let single: Option<T> = self.http.get(&url).await?;
                Ok(single.map(|o| vec![o]))
            }
            _ => self.http.get(&url).await,
        }
    }
}

/// Build the WAPI root URL from the host configuration
fn wapi_base_url(host: &HostConfig) -> String {
    let root = if host.host.starts_with("http://") || host.host.starts_with("https://") {
        host.host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}:{}", host.host, host.port)
    };
    format!("{}/wapi/v{}", root, host.version)
}

#[async_trait::async_trait]
impl InfobloxConnector for InfobloxClient {
    async fn get_ipv4_networks(
        &self,
        obj: &Ipv4Network,
        query: &QueryParams,
    ) -> Result<Option<Vec<Ipv4Network>>, InfobloxError> {
        self.get_object(obj, None, query).await
    }

    async fn get_ipv6_networks(
        &self,
        obj: &Ipv6Network,
        query: &QueryParams,
    ) -> Result<Option<Vec<Ipv6Network>>, InfobloxError> {
        self.get_object(obj, None, query).await
    }
}

//! Provider configuration
//!
//! Connection settings for the Grid Master, loaded from environment
//! variables and checked against the provider schema.

use crate::error::ProviderError;
use infoblox_client::{HostConfig, InfobloxClient, TransportConfig};
use plugin_sdk::{ResourceData, Schema, SchemaMap};
use serde_json::{Map, Value};
use std::env;
use std::time::Duration;

/// Schema attribute name and the environment variable it is read from
const ENV_VARS: &[(&str, &str)] = &[
    ("server", "INFOBLOX_SERVER"),
    ("username", "INFOBLOX_USERNAME"),
    ("password", "INFOBLOX_PASSWORD"),
    ("port", "PORT"),
    ("wapi_version", "WAPI_VERSION"),
    ("sslmode", "SSLMODE"),
    ("connect_timeout", "CONNECT_TIMEOUT"),
    ("pool_connections", "POOL_CONNECTIONS"),
];

/// Provider configuration schema
pub fn provider_schema() -> SchemaMap {
    let mut schema = SchemaMap::new();
    schema.insert(
        "server".to_string(),
        Schema::string()
            .required()
            .description("Infoblox server IP address."),
    );
    schema.insert(
        "username".to_string(),
        Schema::string()
            .required()
            .description("User to authenticate with Infoblox server."),
    );
    schema.insert(
        "password".to_string(),
        Schema::string()
            .required()
            .description("Password to authenticate with Infoblox server."),
    );
    schema.insert(
        "port".to_string(),
        Schema::string()
            .optional()
            .default_value("443")
            .description("Port number used for connection for Infoblox Server."),
    );
    schema.insert(
        "wapi_version".to_string(),
        Schema::string()
            .optional()
            .default_value("2.7")
            .description("WAPI Version of Infoblox server defaults to v2.7."),
    );
    schema.insert(
        "sslmode".to_string(),
        Schema::bool().optional().default_value(false).description(
            "If set, the Infoblox server certificate is verified. \
             If unset, any certificate is accepted.",
        ),
    );
    schema.insert(
        "connect_timeout".to_string(),
        Schema::int()
            .optional()
            .default_value(60)
            .description("Maximum wait for connection, in seconds. Zero means wait indefinitely."),
    );
    schema.insert(
        "pool_connections".to_string(),
        Schema::int().optional().default_value(10).description(
            "Maximum number of connections to establish to the Infoblox server. \
             Zero means unlimited.",
        ),
    );
    schema
}

/// Resolved provider configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub server: String,
    pub username: String,
    pub password: String,
    pub port: String,
    pub wapi_version: String,
    /// Verify the appliance certificate; unset accepts any certificate
    pub sslmode: bool,
    /// Request timeout in seconds; 0 waits indefinitely
    pub connect_timeout: u64,
    /// Idle connections kept per host; 0 means unlimited
    pub pool_connections: usize,
}

impl ProviderConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load the configuration through an environment lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let mut config = Map::new();

        for (attr, var) in ENV_VARS {
            let Some(raw) = lookup(var) else { continue };
            let value = match *attr {
                "sslmode" => Value::Bool(raw.parse::<bool>().map_err(|e| {
                    ProviderError::InvalidConfig(format!(
                        "{var} must be true or false, got {raw}: {e}"
                    ))
                })?),
                "connect_timeout" | "pool_connections" => {
                    Value::from(raw.parse::<u64>().map_err(|e| {
                        ProviderError::InvalidConfig(format!(
                            "{var} must be a non-negative integer, got {raw}: {e}"
                        ))
                    })?)
                }
                _ => Value::String(raw),
            };
            config.insert(attr.to_string(), value);
        }

        let data = crate::provider::provider().configure(config).map_err(|e| {
            ProviderError::InvalidConfig(format!("{} (set {})", e, env_hint(&e.to_string())))
        })?;

        Self::from_resource_data(&data)
    }

    /// Read the configuration from validated provider data
    pub fn from_resource_data(data: &ResourceData) -> Result<Self, ProviderError> {
        let string = |key: &str| {
            data.get_string(key)
                .ok_or_else(|| ProviderError::InvalidConfig(format!("{key} is required")))
        };
        let int = |key: &str| {
            data.get(key).and_then(|v| v.as_u64()).ok_or_else(|| {
                ProviderError::InvalidConfig(format!("{key} must be a non-negative integer"))
            })
        };

        Ok(Self {
            server: string("server")?,
            username: string("username")?,
            password: string("password")?,
            port: string("port")?,
            wapi_version: string("wapi_version")?,
            sslmode: data.get("sslmode").and_then(|v| v.as_bool()).unwrap_or(false),
            connect_timeout: int("connect_timeout")?,
            pool_connections: usize::try_from(int("pool_connections")?).map_err(|e| {
                ProviderError::InvalidConfig(format!("pool_connections is too large: {e}"))
            })?,
        })
    }

    /// Transport settings of the WAPI client
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            ssl_verify: self.sslmode,
            http_request_timeout: (self.connect_timeout > 0)
                .then(|| Duration::from_secs(self.connect_timeout)),
            http_pool_connections: if self.pool_connections == 0 {
                usize::MAX
            } else {
                self.pool_connections
            },
        }
    }

    /// Build the WAPI client for this configuration
    pub fn connector(&self) -> Result<InfobloxClient, ProviderError> {
        let host = HostConfig {
            host: self.server.clone(),
            port: self.port.clone(),
            version: self.wapi_version.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        };

        Ok(InfobloxClient::new(host, self.transport_config())?)
    }
}

/// Environment variable that sets the attribute named in an error message
fn env_hint(message: &str) -> &'static str {
    ENV_VARS
        .iter()
        .find(|(attr, _)| message.ends_with(attr))
        .map_or("the INFOBLOX_* variables", |(_, var)| *var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const CREDENTIALS: &[(&str, &str)] = &[
        ("INFOBLOX_SERVER", "gm.example.com"),
        ("INFOBLOX_USERNAME", "admin"),
        ("INFOBLOX_PASSWORD", "infoblox"),
    ];

    #[test]
    fn test_defaults_apply() {
        let config = ProviderConfig::from_lookup(lookup(CREDENTIALS)).unwrap();

        assert_eq!(config.server, "gm.example.com");
        assert_eq!(config.port, "443");
        assert_eq!(config.wapi_version, "2.7");
        assert!(!config.sslmode);
        assert_eq!(config.connect_timeout, 60);
        assert_eq!(config.pool_connections, 10);
    }

    #[test]
    fn test_overrides() {
        let mut vars = CREDENTIALS.to_vec();
        vars.extend([
            ("PORT", "8443"),
            ("WAPI_VERSION", "2.12"),
            ("SSLMODE", "true"),
            ("CONNECT_TIMEOUT", "5"),
            ("POOL_CONNECTIONS", "2"),
        ]);
        let config = ProviderConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.port, "8443");
        assert_eq!(config.wapi_version, "2.12");
        assert!(config.sslmode);
        assert_eq!(config.connect_timeout, 5);
        assert_eq!(config.pool_connections, 2);
        assert!(config.connector().is_ok());
    }

    #[test]
    fn test_sslmode_controls_certificate_verification() {
        let config = ProviderConfig::from_lookup(lookup(CREDENTIALS)).unwrap();
        assert!(!config.transport_config().ssl_verify);

        let mut vars = CREDENTIALS.to_vec();
        vars.push(("SSLMODE", "true"));
        let config = ProviderConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(config.transport_config().ssl_verify);

        let mut vars = CREDENTIALS.to_vec();
        vars.push(("SSLMODE", "false"));
        let config = ProviderConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(!config.transport_config().ssl_verify);
    }

    #[test]
    fn test_transport_zero_values_mean_unbounded() {
        let mut vars = CREDENTIALS.to_vec();
        vars.extend([("CONNECT_TIMEOUT", "0"), ("POOL_CONNECTIONS", "0")]);
        let transport = ProviderConfig::from_lookup(lookup(&vars))
            .unwrap()
            .transport_config();

        assert_eq!(transport.http_request_timeout, None);
        assert_eq!(transport.http_pool_connections, usize::MAX);

        let transport = ProviderConfig::from_lookup(lookup(CREDENTIALS))
            .unwrap()
            .transport_config();
        assert_eq!(transport.http_request_timeout, Some(Duration::from_secs(60)));
        assert_eq!(transport.http_pool_connections, 10);
    }

    #[test]
    fn test_missing_server() {
        let err = ProviderConfig::from_lookup(lookup(&CREDENTIALS[1..])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Missing required attribute: server (set INFOBLOX_SERVER)"
        );
    }

    #[test]
    fn test_invalid_sslmode() {
        let mut vars = CREDENTIALS.to_vec();
        vars.push(("SSLMODE", "maybe"));
        let err = ProviderConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(&err, ProviderError::InvalidConfig(_)));
        assert!(err.to_string().contains("SSLMODE must be true or false, got maybe"));
    }
}

//! Infoblox WAPI models
//!
//! These models match the WAPI `network` and `ipv6network` objects.
//! Only the fields read by the provider data sources are modelled.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A WAPI object type that can be fetched with `get_object`
pub trait WapiObject: DeserializeOwned + Send + Sync {
    /// WAPI object type used in the request path (e.g. `network`)
    fn object_type(&self) -> &'static str;

    /// Fields requested through `_return_fields`
    fn return_fields(&self) -> &[String];

    /// Replace the requested return fields
    fn set_return_fields(&mut self, fields: Vec<String>);

    /// Add a return field unless it is already requested
    fn add_return_field(&mut self, field: &str) {
        if !self.return_fields().iter().any(|f| f == field) {
            let mut fields = self.return_fields().to_vec();
            fields.push(field.to_string());
            self.set_return_fields(fields);
        }
    }
}

/// Extensible attributes attached to a WAPI object.
///
/// On the wire every attribute is wrapped as `{"Name": {"value": v}}`.
/// The map held here has the `value` layer removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ea(BTreeMap<String, Value>);

impl Ea {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Get an attribute value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether no attributes are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attributes without the WAPI `value` wrapper
    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

impl FromIterator<(String, Value)> for Ea {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Ea {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wrapped: BTreeMap<&String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k, serde_json::json!({ "value": v })))
            .collect();
        wrapped.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ea {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
        let attrs = raw
            .unwrap_or_default()
            .into_iter()
            .map(|(name, attr)| match attr {
                Value::Object(mut obj) if obj.contains_key("value") => {
                    let value = obj.remove("value").unwrap_or(Value::Null);
                    (name, value)
                }
                other => (name, other),
            })
            .collect();
        Ok(Self(attrs))
    }
}

/// Default return fields for `network`
pub const IPV4_NETWORK_RETURN_FIELDS: &[&str] =
    &["network", "network_view", "comment", "utilization"];

/// Default return fields for `ipv6network`
pub const IPV6_NETWORK_RETURN_FIELDS: &[&str] = &["network", "network_view", "comment"];

/// IPv4 network (WAPI object `network`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ipv4Network {
    #[serde(rename = "_ref", default)]
    pub reference: String,
    #[serde(default)]
    pub network_view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>, // e.g., "10.0.0.0/24"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
    /// Addresses in use, per-mille of the network size (0-1000)
    #[serde(default)]
    pub utilization: u32,
    #[serde(skip)]
    return_fields: Vec<String>,
}

impl Ipv4Network {
    /// Create an empty query object with the default return fields
    pub fn new() -> Self {
        Self {
            return_fields: IPV4_NETWORK_RETURN_FIELDS.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl WapiObject for Ipv4Network {
    fn object_type(&self) -> &'static str {
        "network"
    }

    fn return_fields(&self) -> &[String] {
        &self.return_fields
    }

    fn set_return_fields(&mut self, fields: Vec<String>) {
        self.return_fields = fields;
    }
}

/// IPv6 network (WAPI object `ipv6network`)
///
/// The appliance reports no utilization for IPv6 networks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ipv6Network {
    #[serde(rename = "_ref", default)]
    pub reference: String,
    #[serde(default)]
    pub network_view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>, // e.g., "2001:db8::/64"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
    #[serde(skip)]
    return_fields: Vec<String>,
}

impl Ipv6Network {
    /// Create an empty query object with the default return fields
    pub fn new() -> Self {
        Self {
            return_fields: IPV6_NETWORK_RETURN_FIELDS.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl WapiObject for Ipv6Network {
    fn object_type(&self) -> &'static str {
        "ipv6network"
    }

    fn return_fields(&self) -> &[String] {
        &self.return_fields
    }

    fn set_return_fields(&mut self, fields: Vec<String>) {
        self.return_fields = fields;
    }
}

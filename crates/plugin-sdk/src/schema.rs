//! Attribute schemas
//!
//! Schemas are descriptive: they declare attribute types, whether the user
//! or the provider sets them, defaults and documentation.

use crate::diag::Diagnostics;
use crate::resource_data::ResourceData;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Attribute schemas keyed by attribute name
pub type SchemaMap = BTreeMap<String, Schema>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Int,
    Bool,
    Map,
    List,
}

impl ValueType {
    /// Whether `value` has this type. `null` matches every type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (ValueType::String, Value::String(_)) => true,
            (ValueType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (ValueType::Bool, Value::Bool(_)) => true,
            (ValueType::Map, Value::Object(_)) => true,
            (ValueType::List, Value::Array(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Bool => "bool",
            ValueType::Map => "map",
            ValueType::List => "list",
        };
        f.write_str(name)
    }
}

/// Schema of a single attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub value_type: ValueType,
    /// Must be set in the configuration
    pub required: bool,
    /// May be set in the configuration
    pub optional: bool,
    /// Set by the provider
    pub computed: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Element attributes of a list of objects
    pub elem: Option<SchemaMap>,
}

impl Schema {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            required: false,
            optional: false,
            computed: false,
            default: None,
            description: None,
            elem: None,
        }
    }

    pub fn string() -> Self {
        Self::new(ValueType::String)
    }

    pub fn int() -> Self {
        Self::new(ValueType::Int)
    }

    pub fn bool() -> Self {
        Self::new(ValueType::Bool)
    }

    pub fn map() -> Self {
        Self::new(ValueType::Map)
    }

    /// List whose elements are objects described by `elem`
    pub fn list_of(elem: SchemaMap) -> Self {
        Self {
            elem: Some(elem),
            ..Self::new(ValueType::List)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Read function of a data source, generic over the provider meta
/// (the configured API connector).
#[async_trait::async_trait]
pub trait ReadContext<M: ?Sized + Send + Sync>: Send + Sync {
    async fn read(&self, data: &mut ResourceData, meta: &M) -> Diagnostics;
}

/// A resource or data source: its schema and read function
pub struct Resource<M: ?Sized + Send + Sync> {
    pub schema: SchemaMap,
    pub read: Option<Arc<dyn ReadContext<M>>>,
}

impl<M: ?Sized + Send + Sync> Resource<M> {
    /// Resource with a schema and no read function yet
    pub fn new(schema: SchemaMap) -> Self {
        Self { schema, read: None }
    }
}

impl<M: ?Sized + Send + Sync> Clone for Resource<M> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            read: self.read.clone(),
        }
    }
}

impl<M: ?Sized + Send + Sync> fmt::Debug for Resource<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("schema", &self.schema)
            .field("read", &self.read.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_type_accepts() {
        assert!(ValueType::String.accepts(&json!("x")));
        assert!(ValueType::Int.accepts(&json!(-1)));
        assert!(!ValueType::Int.accepts(&json!(1.5)));
        assert!(ValueType::Map.accepts(&json!({})));
        assert!(ValueType::List.accepts(&Value::Null));
        assert!(!ValueType::Bool.accepts(&json!("true")));
    }

    #[test]
    fn test_builder_flags() {
        let schema = Schema::string()
            .optional()
            .default_value("default")
            .description("Network view");

        assert!(schema.optional && !schema.required && !schema.computed);
        assert_eq!(schema.default, Some(json!("default")));
        assert_eq!(schema.description.as_deref(), Some("Network view"));
    }
}

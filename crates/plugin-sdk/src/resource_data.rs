//! Per-read resource data
//!
//! Holds the user configuration and the state written by the provider,
//! both checked against the resource schema.

use crate::error::SdkError;
use crate::schema::{Schema, SchemaMap, ValueType};
use serde_json::{Map, Value};

/// Configuration and state of one resource during a read
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: SchemaMap,
    config: Map<String, Value>,
    state: Map<String, Value>,
    id: String,
}

impl ResourceData {
    /// Validate `config` against `schema`
    ///
    /// Every required attribute must be present, every key must be declared
    /// and values must match the declared type.
    pub fn new(schema: SchemaMap, config: Map<String, Value>) -> Result<Self, SdkError> {
        for (key, value) in &config {
            let attr = schema
                .get(key)
                .ok_or_else(|| SdkError::UnknownAttribute(key.clone()))?;
            check_type(key, attr, value)?;
        }

        for (key, attr) in &schema {
            let missing = config.get(key).map_or(true, Value::is_null);
            if attr.required && missing {
                return Err(SdkError::MissingRequired(key.clone()));
            }
        }

        Ok(Self {
            schema,
            config,
            state: Map::new(),
            id: String::new(),
        })
    }

    /// Value of an attribute: state, then configuration, then schema default
    pub fn get(&self, key: &str) -> Option<Value> {
        self.state
            .get(key)
            .or_else(|| self.config.get(key))
            .filter(|v| !v.is_null())
            .cloned()
            .or_else(|| self.schema.get(key).and_then(|s| s.default.clone()))
    }

    /// Get a string attribute
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a map attribute
    pub fn get_map(&self, key: &str) -> Option<Map<String, Value>> {
        match self.get(key)? {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Write an attribute into state
    ///
    /// For lists of objects every element key must be declared by the
    /// element schema; element attributes left out receive their default.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), SdkError> {
        let attr = self
            .schema
            .get(key)
            .ok_or_else(|| SdkError::UnknownAttribute(key.to_string()))?;
        check_type(key, attr, &value)?;

        let value = match (&attr.elem, value) {
            (Some(elem), Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|item| fill_element(key, elem, item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            (_, value) => value,
        };

        self.state.insert(key.to_string(), value);
        Ok(())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// State as a JSON object, including `id`
    pub fn state(&self) -> Value {
        let mut state = self.state.clone();
        state.insert("id".to_string(), Value::String(self.id.clone()));
        Value::Object(state)
    }
}

fn check_type(key: &str, attr: &Schema, value: &Value) -> Result<(), SdkError> {
    if attr.value_type.accepts(value) {
        Ok(())
    } else {
        Err(SdkError::TypeMismatch {
            key: key.to_string(),
            expected: attr.value_type.to_string(),
        })
    }
}

fn fill_element(key: &str, elem: &SchemaMap, item: Value) -> Result<Value, SdkError> {
    let Value::Object(mut fields) = item else {
        return Err(SdkError::TypeMismatch {
            key: key.to_string(),
            expected: ValueType::Map.to_string(),
        });
    };

    for (field, value) in &fields {
        let attr = elem
            .get(field)
            .ok_or_else(|| SdkError::UnknownAttribute(format!("{}.{}", key, field)))?;
        check_type(&format!("{}.{}", key, field), attr, value)?;
    }

    for (field, attr) in elem {
        if let Some(default) = &attr.default {
            fields.entry(field.clone()).or_insert_with(|| default.clone());
        }
    }

    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> SchemaMap {
        let mut elem = SchemaMap::new();
        elem.insert("id".to_string(), Schema::string().computed());
        elem.insert(
            "network_view".to_string(),
            Schema::string().optional().default_value("default"),
        );
        elem.insert("utilization".to_string(), Schema::int().computed());

        let mut schema = SchemaMap::new();
        schema.insert("filters".to_string(), Schema::map().required());
        schema.insert("results".to_string(), Schema::list_of(elem).computed());
        schema
    }

    fn config(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_missing_required_attribute() {
        let err = ResourceData::new(schema(), Map::new()).unwrap_err();
        assert!(matches!(err, SdkError::MissingRequired(key) if key == "filters"));
    }

    #[test]
    fn test_unknown_config_attribute() {
        let config = config(json!({"filters": {}, "bogus": 1}));
        let err = ResourceData::new(schema(), config).unwrap_err();
        assert!(matches!(err, SdkError::UnknownAttribute(key) if key == "bogus"));
    }

    #[test]
    fn test_config_type_mismatch() {
        let err = ResourceData::new(schema(), config(json!({"filters": "x"}))).unwrap_err();
        assert!(matches!(err, SdkError::TypeMismatch { .. }));
    }

    #[test]
    fn test_set_fills_element_defaults() {
        let config = config(json!({"filters": {"network": "10.0.0.0/8"}}));
        let mut data = ResourceData::new(schema(), config).unwrap();
        data.set("results", json!([{"id": "network/abc", "utilization": 10}])).unwrap();

        assert_eq!(
            data.get("results"),
            Some(json!([{"id": "network/abc", "network_view": "default", "utilization": 10}]))
        );
        assert_eq!(data.get_map("filters").unwrap()["network"], json!("10.0.0.0/8"));
    }

    #[test]
    fn test_set_rejects_undeclared_element_key() {
        let mut data = ResourceData::new(schema(), config(json!({"filters": {}}))).unwrap();
        let err = data.set("results", json!([{"cidr": "10.0.0.0/8"}])).unwrap_err();
        assert!(matches!(err, SdkError::UnknownAttribute(key) if key == "results.cidr"));
    }

    #[test]
    fn test_state_includes_id() {
        let mut data = ResourceData::new(schema(), config(json!({"filters": {}}))).unwrap();
        data.set("results", json!([])).unwrap();
        data.set_id("1700000000");

        assert_eq!(data.id(), "1700000000");
        assert_eq!(data.state(), json!({"id": "1700000000", "results": []}));
    }
}

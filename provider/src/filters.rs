//! Translation of the user `filters` map into WAPI search fields

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Convert the `filters` attribute into string search fields.
///
/// Keys pass through unchanged so WAPI modifiers (`comment~`, `*Site`)
/// keep working. Non-string scalars are rendered as JSON text; `null`
/// entries are dropped.
pub fn filter_from_map(filters: &Map<String, Value>) -> BTreeMap<String, String> {
    filters
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

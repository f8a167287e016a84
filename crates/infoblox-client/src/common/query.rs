//! Query parameters for WAPI object searches

use std::collections::BTreeMap;

/// Search parameters passed to `get_object`
///
/// Search fields are sent verbatim as `key=value` pairs, so WAPI search
/// modifiers (`name~`, `*Site`) pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Route the search through the Grid Master (`_proxy_search=GM`)
    pub force_proxy: bool,
    pub search_fields: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new(force_proxy: bool, search_fields: BTreeMap<String, String>) -> Self {
        Self {
            force_proxy,
            search_fields,
        }
    }

    /// Build the `(key, value)` pairs of the request query
    pub fn to_pairs(&self, return_fields: &[String]) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.search_fields.len() + 2);

        if !return_fields.is_empty() {
            pairs.push(("_return_fields".to_string(), return_fields.join(",")));
        }
        if self.force_proxy {
            pairs.push(("_proxy_search".to_string(), "GM".to_string()));
        }
        pairs.extend(
            self.search_fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_order_and_proxy() {
        let mut fields = BTreeMap::new();
        fields.insert("network_view".to_string(), "default".to_string());
        fields.insert("*Site".to_string(), "Amsterdam".to_string());

        let return_fields = ["network".to_string(), "extattrs".to_string()];
        let pairs = QueryParams::new(true, fields).to_pairs(&return_fields);

        assert_eq!(
            pairs,
            vec![
                ("_return_fields".to_string(), "network,extattrs".to_string()),
                ("_proxy_search".to_string(), "GM".to_string()),
                ("*Site".to_string(), "Amsterdam".to_string()),
                ("network_view".to_string(), "default".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(QueryParams::default().to_pairs(&[]).is_empty());
    }
}

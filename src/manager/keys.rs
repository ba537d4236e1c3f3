//! Cache key derivation.
//!
//! Keys have the shape `resource:id` or `resource:id:{params}`. Query
//! parameters are serialized sorted by name so that the same logical
//! parameters always produce the same key.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// Query parameters attached to a resource request.
pub type QueryParams = HashMap<String, Value>;

/// Separator between key segments.
pub const KEY_SEPARATOR: char = ':';

/// Options controlling key derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOptions {
    /// Append serialized query parameters to the key.
    pub include_query_params: bool,
}

impl KeyOptions {
    pub fn with_query_params() -> Self {
        Self {
            include_query_params: true,
        }
    }
}

/// Builds the cache key for a resource.
pub fn generate_cache_key(
    resource_name: &str,
    resource_id: Option<&str>,
    query_params: Option<&QueryParams>,
    options: KeyOptions,
) -> String {
    let mut key = resource_prefix(resource_name);
    key.push_str(resource_id.unwrap_or(""));

    if options.include_query_params {
        key.push(KEY_SEPARATOR);
        key.push_str(&serialize_query_params(query_params));
    }

    key
}

/// Prefix shared by every key of `resource_name`.
pub fn resource_prefix(resource_name: &str) -> String {
    format!("{}{}", resource_name, KEY_SEPARATOR)
}

/// Serializes parameters as a JSON object with keys in sorted order.
///
/// Missing parameters serialize the same as an empty map.
pub fn serialize_query_params(query_params: Option<&QueryParams>) -> String {
    let sorted: BTreeMap<&str, &Value> = query_params
        .into_iter()
        .flatten()
        .map(|(name, value)| (name.as_str(), value))
        .collect();

    serde_json::to_string(&sorted).unwrap_or_else(|_| String::from("{}"))
}

//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{validate_ttl, CacheControl};
use crate::manager::SetOptions;

/// Request body for `PUT /entries/:key`
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntryRequest {
    /// The value to cache
    pub value: Value,
    /// Resource name used to pick a resource-specific TTL
    #[serde(default)]
    pub resource: Option<String>,
    /// Explicit TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Cache-control metadata stored with the entry
    #[serde(default)]
    pub cache_control: Option<CacheControl>,
}

impl SetEntryRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.ttl.map(validate_ttl) {
            Some(Err(err)) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn options(&self) -> SetOptions {
        SetOptions {
            ttl: self.ttl,
            cache_control: self.cache_control.clone(),
        }
    }
}

/// Request body for `PUT /enabled`
#[derive(Debug, Clone, Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

/// Request body for `PUT /ttl/default` and `PUT /ttl/resources/:resource`
#[derive(Debug, Clone, Deserialize)]
pub struct TtlRequest {
    /// TTL in seconds
    pub ttl: u64,
}

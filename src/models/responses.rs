//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheControl, CacheEntry};

/// Response body for `GET /entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub key: String,
    pub value: Value,
    /// Seconds until the entry expires
    pub ttl_remaining: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,
}

impl From<CacheEntry<Value>> for EntryResponse {
    fn from(entry: CacheEntry<Value>) -> Self {
        Self {
            ttl_remaining: entry.ttl_remaining().as_secs(),
            key: entry.key,
            value: entry.value,
            cache_control: entry.cache_control,
        }
    }
}

/// Response body for `PUT /entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub key: String,
    /// TTL the entry was stored with
    pub ttl: u64,
    /// False when the cache is disabled and nothing was stored
    pub cached: bool,
}

/// Response body for `DELETE /entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    pub deleted: bool,
}

/// Response body for `DELETE /resources/:resource`
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub resource: String,
    pub removed: usize,
}

/// Response body for `GET|PUT /ttl/resources/:resource`
#[derive(Debug, Clone, Serialize)]
pub struct ResourceTtlResponse {
    pub resource: String,
    pub ttl: u64,
}

/// Response body for `PUT /enabled` and `PUT /ttl/default`
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub enabled: bool,
    pub default_ttl: u64,
}

/// Response body for operations that only report success
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

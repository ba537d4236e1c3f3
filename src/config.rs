//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment
//! variables.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::cache::{validate_ttl, StrategyKind, MAX_TTL_SECONDS};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whether the cache serves reads and accepts writes at startup
    pub enabled: bool,
    /// Eviction strategy for the process
    pub strategy: StrategyKind,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds
    pub default_ttl: u64,
    /// Per-resource TTL overrides in seconds
    pub resource_ttl: HashMap<String, u64>,
    /// Background sweep interval in seconds (time-based strategy)
    pub sweep_interval: u64,
    /// Admin HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Enable the cache (default: true)
    /// - `CACHE_STRATEGY` - `time-based` or `lru` (default: time-based)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_MAX_AGE` - Default TTL in seconds (default: 300)
    /// - `CACHE_RESOURCE_TTL` - JSON object of resource TTLs (default: {})
    /// - `CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - Admin HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults with a warning.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let resource_ttl = match lookup("CACHE_RESOURCE_TTL") {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring CACHE_RESOURCE_TTL: {}", err);
                defaults.resource_ttl.clone()
            }),
            None => defaults.resource_ttl.clone(),
        };

        Self {
            enabled: parse_var(&lookup, "CACHE_ENABLED", defaults.enabled),
            strategy: parse_var(&lookup, "CACHE_STRATEGY", defaults.strategy),
            max_entries: parse_var(&lookup, "CACHE_MAX_SIZE", defaults.max_entries),
            default_ttl: parse_var(&lookup, "CACHE_MAX_AGE", defaults.default_ttl),
            resource_ttl,
            sweep_interval: parse_var(&lookup, "CACHE_SWEEP_INTERVAL", defaults.sweep_interval),
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port),
        }
    }

    /// Rejects zero sizes, TTLs and intervals.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_MAX_SIZE must be greater than zero".to_string(),
            ));
        }
        if validate_ttl(self.default_ttl).is_err() {
            return Err(CacheError::InvalidConfig(format!(
                "CACHE_MAX_AGE must be between 1 and {} seconds",
                MAX_TTL_SECONDS
            )));
        }
        if self.sweep_interval == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_SWEEP_INTERVAL must be greater than zero".to_string(),
            ));
        }
        if let Some((resource, _)) = self
            .resource_ttl
            .iter()
            .find(|(_, ttl)| validate_ttl(**ttl).is_err())
        {
            return Err(CacheError::InvalidConfig(format!(
                "TTL for resource '{}' must be between 1 and {} seconds",
                resource, MAX_TTL_SECONDS
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: StrategyKind::TimeBased,
            max_entries: 1000,
            default_ttl: 300,
            resource_ttl: HashMap::new(),
            sweep_interval: 60,
            server_port: 3000,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            default
        }),
        None => default,
    }
}

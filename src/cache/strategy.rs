//! Strategy Module
//!
//! The capability interface every eviction strategy implements.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheControl, CacheEntry, CacheStats};
use crate::error::{CacheError, Result};

// == Strategy Kind ==
/// Tag identifying a strategy implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    #[serde(rename = "time-based")]
    TimeBased,
    #[serde(rename = "lru")]
    Lru,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::TimeBased => "time-based",
            StrategyKind::Lru => "lru",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time-based" | "time_based" | "timebased" => Ok(StrategyKind::TimeBased),
            "lru" => Ok(StrategyKind::Lru),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown cache strategy '{}' (expected 'time-based' or 'lru')",
                other
            ))),
        }
    }
}

// == Cache Strategy ==
/// Storage and eviction behaviour behind the cache manager.
///
/// Implementations know nothing about resources, TTL defaults or the
/// enabled flag. Every operation runs to completion without interleaving
/// with another operation on the same strategy.
#[async_trait]
pub trait CacheStrategy<V>: Send + Sync {
    /// Which implementation this is.
    fn kind(&self) -> StrategyKind;

    /// Returns the entry if present and live. Expired entries are removed.
    async fn get(&self, key: &str) -> Option<CacheEntry<V>>;

    /// Inserts or replaces `key`, expiring `ttl_seconds` from now.
    async fn set(
        &self,
        key: &str,
        value: V,
        ttl_seconds: u64,
        cache_control: Option<CacheControl>,
    ) -> Result<()>;

    /// Removes `key` if present; returns whether it was.
    async fn delete(&self, key: &str) -> bool;

    /// Removes every entry; returns how many were held.
    async fn clear(&self) -> usize;

    /// Number of entries held, including expired ones not yet removed.
    async fn size(&self) -> usize;

    /// Removes every key starting with `prefix`; returns the count.
    async fn remove_by_prefix(&self, prefix: &str) -> usize;

    /// Removes all expired entries now; returns the count.
    async fn purge_expired(&self) -> usize;

    async fn stats(&self) -> CacheStats;

    /// Stops background work and empties the store. Safe to call repeatedly.
    async fn dispose(&self);
}

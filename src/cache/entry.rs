//! Cache Entry Module
//!
//! Defines the record stored for every cached value.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::cache::MAX_TTL_SECONDS;

// == Cache Control ==
/// Caller-supplied cache-control metadata.
///
/// Carried alongside the value and handed back on reads. The cache never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheControl(String);

impl CacheControl {
    pub fn new(directives: impl Into<String>) -> Self {
        Self(directives.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Cache Entry ==
/// A single cached value with its key and lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// The derived cache key
    pub key: String,
    /// Insertion (or last update) time
    pub created_at: Instant,
    /// `created_at + ttl`
    pub expires_at: Instant,
    /// Pass-through metadata from the caller
    pub cache_control: Option<CacheControl>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` from now.
    pub fn new(
        key: impl Into<String>,
        value: V,
        ttl_seconds: u64,
        cache_control: Option<CacheControl>,
    ) -> Self {
        Self::starting_at(key, value, ttl_seconds, cache_control, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    ///
    /// `ttl_seconds` is capped at [`MAX_TTL_SECONDS`].
    pub fn starting_at(
        key: impl Into<String>,
        value: V,
        ttl_seconds: u64,
        cache_control: Option<CacheControl>,
        now: Instant,
    ) -> Self {
        Self {
            value,
            key: key.into(),
            created_at: now,
            expires_at: now + Duration::from_secs(ttl_seconds.min(MAX_TTL_SECONDS)),
            cache_control,
        }
    }

    // == Is Expired ==
    /// An entry is live iff `now < expires_at`; at the boundary it is expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks expiry against the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation() {
        let entry = CacheEntry::new("users:1", "alice", 60, None);

        assert_eq!(entry.value, "alice");
        assert_eq!(entry.key, "users:1");
        assert_eq!(entry.expires_at - entry.created_at, Duration::from_secs(60));
        assert!(!entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = CacheEntry::new("k", 1u32, 1, None);
        assert!(!entry.is_expired());

        tokio::time::advance(Duration::from_millis(1100)).await;

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_remaining() {
        let entry = CacheEntry::new("k", (), 10, None);
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(entry.ttl_remaining(), Duration::from_secs(6));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::starting_at("k", (), 5, None, now);

        assert!(!entry.is_expired_at(now + Duration::from_millis(4999)));
        assert!(entry.is_expired_at(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_huge_ttl_is_capped() {
        let now = Instant::now();
        let entry = CacheEntry::starting_at("k", (), u64::MAX, None, now);

        assert_eq!(
            entry.expires_at - now,
            Duration::from_secs(MAX_TTL_SECONDS)
        );
        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_cache_control_is_passed_through() {
        let control = CacheControl::new("public, max-age=60");
        let entry = CacheEntry::new("k", (), 60, Some(control.clone()));

        assert_eq!(entry.cache_control, Some(control));
        assert_eq!(
            entry.cache_control.unwrap().to_string(),
            "public, max-age=60"
        );
    }
}

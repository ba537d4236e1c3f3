//! Entry Store Module
//!
//! Synchronous storage engine shared by both strategies: a key map, an
//! eviction order and statistics, bounded by a maximum entry count.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{
    CacheControl, CacheEntry, CacheStats, KeyOrder, MAX_KEY_LENGTH, MAX_TTL_SECONDS,
};
use crate::error::{CacheError, Result};

// == Eviction Policy ==
/// Which key is evicted when a new key arrives at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Oldest inserted key; reads and updates do not reorder.
    InsertionOrder,
    /// Least recently read or written key.
    RecentUse,
}

// == Entry Store ==
#[derive(Debug)]
pub struct EntryStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    order: KeyOrder,
    stats: CacheStats,
    max_entries: NonZeroUsize,
    policy: EvictionPolicy,
}

impl<V: Clone> EntryStore<V> {
    // == Constructor ==
    pub fn new(max_entries: NonZeroUsize, policy: EvictionPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            order: KeyOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            policy,
        }
    }

    // == Set ==
    /// Stores a value under `key` for `ttl_seconds`.
    ///
    /// Updating an existing key replaces value and expiry and never evicts.
    /// Inserting a new key at capacity evicts exactly one entry first,
    /// chosen by the store's policy regardless of remaining TTL.
    ///
    /// Returns the evicted key, if any.
    pub fn set(
        &mut self,
        key: &str,
        value: V,
        ttl_seconds: u64,
        cache_control: Option<CacheControl>,
    ) -> Result<Option<String>> {
        validate_key(key)?;
        validate_ttl(ttl_seconds)?;

        let is_update = self.entries.contains_key(key);
        let mut evicted = None;

        if !is_update && self.entries.len() >= self.max_entries.get() {
            if let Some(victim) = self.order.evict_oldest() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(key = %victim, policy = ?self.policy, "evicted cache entry");
                evicted = Some(victim);
            }
        }

        let entry = CacheEntry::starting_at(key, value, ttl_seconds, cache_control, Instant::now());
        self.entries.insert(key.to_string(), entry);

        match self.policy {
            EvictionPolicy::InsertionOrder => self.order.insert(key),
            EvictionPolicy::RecentUse => self.order.touch(key),
        }

        self.stats.set_total_entries(self.entries.len());
        Ok(evicted)
    }

    // == Get ==
    /// Returns a clone of the entry if it is live.
    ///
    /// An expired entry is removed on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(Instant::now()),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        if self.policy == EvictionPolicy::RecentUse {
            self.order.touch(key);
        }
        self.stats.record_hit();
        self.entries.get(key).cloned()
    }

    // == Delete ==
    /// Removes an entry; returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Removes every entry; returns how many were held.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Remove By Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    pub fn remove_by_prefix(&mut self, prefix: &str) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        for key in &matching {
            self.remove_entry(key);
        }
        matching.len()
    }

    // == Purge Expired ==
    /// Removes all expired entries; returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries.get()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}

// == Key Validation ==
/// Rejects empty keys and keys longer than [`MAX_KEY_LENGTH`] bytes.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

// == TTL Validation ==
/// Rejects a zero TTL and TTLs above [`MAX_TTL_SECONDS`].
pub fn validate_ttl(ttl_seconds: u64) -> Result<()> {
    if ttl_seconds == 0 || ttl_seconds > MAX_TTL_SECONDS {
        return Err(CacheError::InvalidTtl(ttl_seconds));
    }
    Ok(())
}

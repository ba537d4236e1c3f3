//! Cache Module
//!
//! Entry storage and the two eviction strategies: time-based (FIFO on
//! overflow, periodic sweep) and LRU.

#[macro_use]
mod macros;

mod entry;
mod lru;
mod order;
mod stats;
mod store;
mod strategy;
mod time_based;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheControl, CacheEntry};
pub use lru::LruCacheStrategy;
pub use order::KeyOrder;
pub use stats::CacheStats;
pub use store::{validate_key, validate_ttl, EntryStore, EvictionPolicy};
pub use strategy::{CacheStrategy, StrategyKind};
pub use time_based::{TimeBasedCacheStrategy, DEFAULT_SWEEP_INTERVAL};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 1024;

/// Longest accepted TTL in seconds (ten years)
pub const MAX_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

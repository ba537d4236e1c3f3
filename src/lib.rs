//! Response Cache - in-process cache between a resource-serving layer and
//! a slow backend.
//!
//! Memoizes fetched values under derived keys, bounds memory with a
//! capacity limit and expires stale values by TTL. One [`CacheManager`]
//! per process wraps a single time-based or LRU strategy.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod manager;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStrategy, StrategyKind};
pub use config::Config;
pub use error::{CacheError, Result};
pub use manager::{CacheManager, KeyOptions, SetOptions};

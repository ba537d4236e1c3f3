//! LRU Strategy Module
//!
//! TTL store bounded by entry count that evicts the least recently used
//! entry on overflow. A read or write touching a key makes it the most
//! recently used. Expired entries are purged lazily on read; a background
//! sweep is optional.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{EntryStore, EvictionPolicy, StrategyKind};
use crate::tasks::SweepTask;

// == LRU Cache Strategy ==
#[derive(Debug)]
pub struct LruCacheStrategy<V> {
    store: Arc<RwLock<EntryStore<V>>>,
    sweep: SweepTask,
}

impl<V> LruCacheStrategy<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates the strategy without a background sweep.
    pub fn new(max_entries: NonZeroUsize) -> Self {
        debug!(max_entries = max_entries.get(), "lru cache strategy created");
        Self {
            store: Self::new_store(max_entries),
            sweep: SweepTask::disarmed(),
        }
    }

    /// Creates the strategy with a background sweep every `sweep_interval`.
    pub fn with_sweep_interval(max_entries: NonZeroUsize, sweep_interval: Duration) -> Self {
        let store = Self::new_store(max_entries);
        let sweep = SweepTask::spawn(Arc::downgrade(&store), sweep_interval, "lru");

        debug!(max_entries = max_entries.get(), "lru cache strategy created");
        Self { store, sweep }
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweep.is_armed()
    }

    fn new_store(max_entries: NonZeroUsize) -> Arc<RwLock<EntryStore<V>>> {
        Arc::new(RwLock::new(EntryStore::new(
            max_entries,
            EvictionPolicy::RecentUse,
        )))
    }
}

impl_store_backed_strategy!(LruCacheStrategy, StrategyKind::Lru, "lru");

//! Time-Based Strategy Module
//!
//! TTL store bounded by entry count. On overflow the oldest inserted entry
//! is evicted; a background sweep removes expired entries that are never
//! read again.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{EntryStore, EvictionPolicy, StrategyKind};
use crate::tasks::SweepTask;

/// Sweep interval used when none is configured.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

// == Time-Based Cache Strategy ==
#[derive(Debug)]
pub struct TimeBasedCacheStrategy<V> {
    store: Arc<RwLock<EntryStore<V>>>,
    sweep: SweepTask,
}

impl<V> TimeBasedCacheStrategy<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates the strategy with the default 60 second sweep.
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self::with_sweep_interval(max_entries, DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates the strategy sweeping every `sweep_interval`.
    ///
    /// Must be called inside a tokio runtime for the sweep to start.
    pub fn with_sweep_interval(max_entries: NonZeroUsize, sweep_interval: Duration) -> Self {
        let store = Arc::new(RwLock::new(EntryStore::new(
            max_entries,
            EvictionPolicy::InsertionOrder,
        )));
        let sweep = SweepTask::spawn(Arc::downgrade(&store), sweep_interval, "time-based");

        debug!(max_entries = max_entries.get(), "time-based cache strategy created");
        Self { store, sweep }
    }

    /// Whether the background sweep is still running.
    pub fn is_sweeping(&self) -> bool {
        self.sweep.is_armed()
    }
}

impl_store_backed_strategy!(TimeBasedCacheStrategy, StrategyKind::TimeBased, "time-based");

//! TTL Sweep Task
//!
//! Background task that periodically removes expired entries from a
//! strategy's store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::EntryStore;

// == Sweep Task ==
/// Owned, cancellable periodic sweep.
///
/// The task holds only a weak reference to the store, so it never keeps a
/// dropped strategy's entries alive. `disarm` flips the armed flag once and
/// aborts the task; further calls do nothing. Dropping the handle disarms.
#[derive(Debug)]
pub struct SweepTask {
    armed: AtomicBool,
    abort: Option<AbortHandle>,
}

impl SweepTask {
    // == Spawn ==
    /// Starts sweeping `store` every `every` on the current tokio runtime.
    ///
    /// Without a runtime, or with a zero interval, the returned task is
    /// disarmed and expired entries are only removed lazily.
    pub fn spawn<V>(store: Weak<RwLock<EntryStore<V>>>, every: Duration, label: &'static str) -> Self
    where
        V: Clone + Send + Sync + 'static,
    {
        if every.is_zero() {
            warn!(strategy = label, "sweep interval is zero, background sweep disabled");
            return Self::disarmed();
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(strategy = label, "no tokio runtime, background sweep disabled");
                return Self::disarmed();
            }
        };

        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let task = runtime.spawn(async move {
            info!(
                strategy = label,
                "Starting TTL sweep task with interval of {} seconds",
                every.as_secs_f64()
            );

            loop {
                ticker.tick().await;

                let Some(store) = store.upgrade() else {
                    debug!(strategy = label, "store dropped, stopping sweep task");
                    break;
                };

                let removed = store.write().await.purge_expired();

                if removed > 0 {
                    info!(strategy = label, "TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!(strategy = label, "TTL sweep: no expired entries found");
                }
            }
        });

        Self {
            armed: AtomicBool::new(true),
            abort: Some(task.abort_handle()),
        }
    }

    /// A task that was never started.
    pub fn disarmed() -> Self {
        Self {
            armed: AtomicBool::new(false),
            abort: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    // == Disarm ==
    /// Stops the sweep. Returns true only for the call that stopped it.
    pub fn disarm(&self) -> bool {
        if !self.armed.swap(false, Ordering::SeqCst) {
            return false;
        }
        if let Some(abort) = &self.abort {
            abort.abort();
        }
        true
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        self.disarm();
    }
}

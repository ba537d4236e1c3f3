//! Shared `CacheStrategy` implementation for strategies backed by an
//! [`EntryStore`](crate::cache::EntryStore).
//!
//! The implementing type must have a `store: Arc<RwLock<EntryStore<V>>>`
//! field and a `sweep: SweepTask` field. Eviction behaviour comes from the
//! store's policy, so only the kind and log label differ.

macro_rules! impl_store_backed_strategy {
    ($strategy:ident, $kind:expr, $label:literal) => {
        #[async_trait::async_trait]
        impl<V> $crate::cache::CacheStrategy<V> for $strategy<V>
        where
            V: Clone + Send + Sync + 'static,
        {
            fn kind(&self) -> $crate::cache::StrategyKind {
                $kind
            }

            async fn get(&self, key: &str) -> Option<$crate::cache::CacheEntry<V>> {
                // Write lock: a read may drop an expired entry or reorder keys.
                self.store.write().await.get(key)
            }

            async fn set(
                &self,
                key: &str,
                value: V,
                ttl_seconds: u64,
                cache_control: Option<$crate::cache::CacheControl>,
            ) -> $crate::error::Result<()> {
                self.store
                    .write()
                    .await
                    .set(key, value, ttl_seconds, cache_control)?;
                Ok(())
            }

            async fn delete(&self, key: &str) -> bool {
                self.store.write().await.delete(key)
            }

            async fn clear(&self) -> usize {
                self.store.write().await.clear()
            }

            async fn size(&self) -> usize {
                self.store.read().await.len()
            }

            async fn remove_by_prefix(&self, prefix: &str) -> usize {
                self.store.write().await.remove_by_prefix(prefix)
            }

            async fn purge_expired(&self) -> usize {
                self.store.write().await.purge_expired()
            }

            async fn stats(&self) -> $crate::cache::CacheStats {
                self.store.read().await.stats()
            }

            async fn dispose(&self) {
                if self.sweep.disarm() {
                    tracing::info!(strategy = $label, "cache strategy disposed, sweep stopped");
                }
                self.store.write().await.clear();
            }
        }
    };
}

//! Cache Manager Module
//!
//! The single entry point callers use. Owns the one active strategy,
//! applies the enabled gate, resolves TTL precedence and derives keys from
//! resource identifiers.

mod audit;
mod keys;

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{
    validate_ttl, CacheControl, CacheEntry, CacheStats, CacheStrategy, LruCacheStrategy,
    StrategyKind, TimeBasedCacheStrategy,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

pub use audit::{AuditSink, CacheAction, TracingAuditSink};
pub use keys::{
    generate_cache_key, resource_prefix, serialize_query_params, KeyOptions, QueryParams,
    KEY_SEPARATOR,
};

// == Settings ==
/// Runtime-adjustable settings the manager starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerSettings {
    pub enabled: bool,
    pub default_ttl: u64,
    pub resource_ttl: HashMap<String, u64>,
}

impl From<&Config> for ManagerSettings {
    fn from(config: &Config) -> Self {
        Self {
            enabled: config.enabled,
            default_ttl: config.default_ttl,
            resource_ttl: config.resource_ttl.clone(),
        }
    }
}

// == Set Options ==
/// Per-call options for [`CacheManager::set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Explicit TTL; overrides resource and default TTLs
    pub ttl: Option<u64>,
    /// Metadata stored with the entry untouched
    pub cache_control: Option<CacheControl>,
}

impl SetOptions {
    pub fn with_ttl(ttl: u64) -> Self {
        Self {
            ttl: Some(ttl),
            cache_control: None,
        }
    }

    pub fn cache_control(mut self, cache_control: CacheControl) -> Self {
        self.cache_control = Some(cache_control);
        self
    }
}

// == Manager Stats ==
#[derive(Debug, Clone, Serialize)]
pub struct ManagerStats {
    pub enabled: bool,
    pub strategy: StrategyKind,
    pub default_ttl: u64,
    #[serde(flatten)]
    pub cache: CacheStats,
    pub hit_rate: f64,
}

// == Cache Manager ==
pub struct CacheManager<V> {
    enabled: AtomicBool,
    default_ttl: AtomicU64,
    resource_ttl: RwLock<HashMap<String, u64>>,
    strategy: Box<dyn CacheStrategy<V>>,
    audit: Arc<dyn AuditSink>,
}

impl<V> CacheManager<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Builds the manager and its strategy from configuration, auditing
    /// through `tracing`.
    ///
    /// Must be called inside a tokio runtime for the time-based sweep to run.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with_audit(config, Arc::new(TracingAuditSink))
    }

    pub fn from_config_with_audit(config: &Config, audit: Arc<dyn AuditSink>) -> Result<Self> {
        config.validate()?;

        let max_entries = NonZeroUsize::new(config.max_entries).ok_or_else(|| {
            CacheError::InvalidConfig("CACHE_MAX_SIZE must be greater than zero".to_string())
        })?;

        let strategy: Box<dyn CacheStrategy<V>> = match config.strategy {
            StrategyKind::TimeBased => Box::new(TimeBasedCacheStrategy::<V>::with_sweep_interval(
                max_entries,
                Duration::from_secs(config.sweep_interval),
            )),
            StrategyKind::Lru => Box::new(LruCacheStrategy::<V>::new(max_entries)),
        };

        info!(
            strategy = %config.strategy,
            max_entries = config.max_entries,
            default_ttl = config.default_ttl,
            enabled = config.enabled,
            "cache manager initialized"
        );

        Self::with_strategy(strategy, ManagerSettings::from(config), audit)
    }

    /// Wraps an already constructed strategy.
    pub fn with_strategy(
        strategy: Box<dyn CacheStrategy<V>>,
        settings: ManagerSettings,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self> {
        validate_ttl(settings.default_ttl)?;
        for ttl in settings.resource_ttl.values() {
            validate_ttl(*ttl)?;
        }

        Ok(Self {
            enabled: AtomicBool::new(settings.enabled),
            default_ttl: AtomicU64::new(settings.default_ttl),
            resource_ttl: RwLock::new(settings.resource_ttl),
            strategy,
            audit,
        })
    }

    // == Enabled Gate ==
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Toggles the gate. Existing entries are kept.
    pub fn set_enabled(&self, enabled: bool) {
        let previous = self.enabled.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            info!(enabled, "cache enabled flag changed");
        }
    }

    // == TTL Settings ==
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl.load(Ordering::SeqCst)
    }

    pub fn set_default_ttl(&self, ttl: u64) -> Result<()> {
        validate_ttl(ttl)?;
        self.default_ttl.store(ttl, Ordering::SeqCst);
        info!(ttl, "default cache TTL updated");
        Ok(())
    }

    /// The resource's override if one is set, otherwise the default TTL.
    pub async fn resource_ttl(&self, resource_name: &str) -> u64 {
        match self.resource_ttl.read().await.get(resource_name) {
            Some(ttl) => *ttl,
            None => self.default_ttl(),
        }
    }

    pub async fn set_resource_ttl(&self, resource_name: &str, ttl: u64) -> Result<()> {
        validate_ttl(ttl)?;
        self.resource_ttl
            .write()
            .await
            .insert(resource_name.to_string(), ttl);
        info!(resource = resource_name, ttl, "resource cache TTL updated");
        Ok(())
    }

    /// Resolves the TTL a `set` would use: explicit option, then the
    /// resource override, then the default.
    pub async fn effective_ttl(&self, resource_name: Option<&str>, options: &SetOptions) -> u64 {
        if let Some(ttl) = options.ttl {
            return ttl;
        }
        if let Some(resource) = resource_name {
            if let Some(ttl) = self.resource_ttl.read().await.get(resource) {
                return *ttl;
            }
        }
        self.default_ttl()
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    // == Get ==
    /// Returns the cached value, or None on a miss, an expired entry or
    /// while disabled.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.get_entry(key).await.map(|entry| entry.value)
    }

    /// Like [`get`](Self::get) but keeps the entry metadata.
    pub async fn get_entry(&self, key: &str) -> Option<CacheEntry<V>> {
        if !self.is_enabled() {
            return None;
        }
        self.strategy.get(key).await
    }

    // == Set ==
    /// Stores `value` under `key` with the TTL resolved for `resource_name`.
    ///
    /// No-op while disabled. Errors only on misuse (zero TTL, bad key).
    pub async fn set(
        &self,
        key: &str,
        value: V,
        resource_name: Option<&str>,
        options: SetOptions,
    ) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let ttl = self.effective_ttl(resource_name, &options).await;
        validate_ttl(ttl)?;

        debug!(key, ttl, "caching value");
        self.strategy
            .set(key, value, ttl, options.cache_control)
            .await
    }

    // == Delete ==
    /// Removes `key`; returns whether it was cached. No-op while disabled.
    pub async fn delete(&self, key: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.strategy.delete(key).await
    }

    // == Clear ==
    pub async fn clear(&self) {
        if !self.is_enabled() {
            return;
        }
        let removed = self.strategy.clear().await;

        self.audit.log_cache_operation(
            "*",
            CacheAction::Clear,
            &Uuid::new_v4().to_string(),
            None,
            Some(&json!({ "removed": removed })),
        );
    }

    // == Invalidate Resource ==
    /// Removes every entry keyed under `resource_name`.
    ///
    /// Emits exactly one audit record per call. Returns the number of
    /// entries removed; always 0 while disabled.
    pub async fn invalidate_resource(&self, resource_name: &str) -> usize {
        if !self.is_enabled() {
            return 0;
        }

        let prefix = resource_prefix(resource_name);
        let removed = self.strategy.remove_by_prefix(&prefix).await;

        self.audit.log_cache_operation(
            resource_name,
            CacheAction::Invalidate,
            &Uuid::new_v4().to_string(),
            None,
            Some(&json!({ "removed": removed, "prefix": prefix })),
        );

        info!(resource = resource_name, removed, "cache resource invalidated");
        removed
    }

    // == Key Generation ==
    pub fn generate_cache_key(
        &self,
        resource_name: &str,
        resource_id: Option<&str>,
        query_params: Option<&QueryParams>,
        options: KeyOptions,
    ) -> String {
        generate_cache_key(resource_name, resource_id, query_params, options)
    }

    // == Size ==
    /// Entries held by the strategy, or 0 while disabled.
    pub async fn size(&self) -> usize {
        if !self.is_enabled() {
            return 0;
        }
        self.strategy.size().await
    }

    // == Stats ==
    pub async fn stats(&self) -> ManagerStats {
        let cache = self.strategy.stats().await;
        ManagerStats {
            enabled: self.is_enabled(),
            strategy: self.strategy_kind(),
            default_ttl: self.default_ttl(),
            hit_rate: cache.hit_rate(),
            cache,
        }
    }

    // == Dispose ==
    /// Stops the strategy's background work and drops its entries.
    pub async fn dispose(&self) {
        self.strategy.dispose().await;
        info!("cache manager disposed");
    }
}

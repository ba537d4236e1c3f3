//! API Handlers
//!
//! HTTP handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::manager::{CacheManager, ManagerStats};
use crate::models::{
    DeleteResponse, EnabledRequest, EntryResponse, HealthResponse, InvalidateResponse,
    MessageResponse, ResourceTtlResponse, SetEntryRequest, SetResponse, SettingsResponse,
    TtlRequest,
};

/// Application state shared across all handlers.
///
/// Holds the process-wide cache manager.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheManager<Value>>,
}

impl AppState {
    pub fn new(cache: CacheManager<Value>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Builds the cache manager from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(CacheManager::from_config(config)?))
    }

    fn settings(&self) -> SettingsResponse {
        SettingsResponse {
            enabled: self.cache.is_enabled(),
            default_ttl: self.cache.default_ttl(),
        }
    }
}

/// Handler for GET /entries/:key
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    let entry = state
        .cache
        .get_entry(&key)
        .await
        .ok_or(CacheError::NotFound(key))?;

    Ok(Json(EntryResponse::from(entry)))
}

/// Handler for PUT /entries/:key
pub async fn set_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetEntryRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let options = req.options();
    let resource = req.resource.as_deref();
    let ttl = state.cache.effective_ttl(resource, &options).await;
    let cached = state.cache.is_enabled();

    state.cache.set(&key, req.value, resource, options).await?;

    Ok(Json(SetResponse { key, ttl, cached }))
}

/// Handler for DELETE /entries/:key
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache.delete(&key).await;
    Json(DeleteResponse { key, deleted })
}

/// Handler for DELETE /entries
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.clear().await;
    Json(MessageResponse::new("Cache cleared"))
}

/// Handler for DELETE /resources/:resource
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate_resource(&resource).await;
    Json(InvalidateResponse { resource, removed })
}

/// Handler for PUT /enabled
pub async fn set_enabled_handler(
    State(state): State<AppState>,
    Json(req): Json<EnabledRequest>,
) -> Json<SettingsResponse> {
    state.cache.set_enabled(req.enabled);
    Json(state.settings())
}

/// Handler for PUT /ttl/default
pub async fn set_default_ttl_handler(
    State(state): State<AppState>,
    Json(req): Json<TtlRequest>,
) -> Result<Json<SettingsResponse>> {
    state.cache.set_default_ttl(req.ttl)?;
    Ok(Json(state.settings()))
}

/// Handler for GET /ttl/resources/:resource
pub async fn get_resource_ttl_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Json<ResourceTtlResponse> {
    let ttl = state.cache.resource_ttl(&resource).await;
    Json(ResourceTtlResponse { resource, ttl })
}

/// Handler for PUT /ttl/resources/:resource
pub async fn set_resource_ttl_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Json(req): Json<TtlRequest>,
) -> Result<Json<ResourceTtlResponse>> {
    state.cache.set_resource_ttl(&resource, req.ttl).await?;
    Ok(Json(ResourceTtlResponse {
        resource,
        ttl: req.ttl,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<ManagerStats> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

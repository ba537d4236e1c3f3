//! API Routes
//!
//! Configures the Axum router with all cache admin endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_entry_handler, get_entry_handler, get_resource_ttl_handler,
    health_handler, invalidate_handler, set_default_ttl_handler, set_enabled_handler,
    set_entry_handler, set_resource_ttl_handler, stats_handler, AppState,
};

/// Creates the admin router.
///
/// # Endpoints
/// - `GET|PUT|DELETE /entries/:key` - Inspect, store or remove one entry
/// - `DELETE /entries` - Clear the cache
/// - `DELETE /resources/:resource` - Invalidate every entry of a resource
/// - `PUT /enabled` - Toggle the cache
/// - `PUT /ttl/default` - Change the default TTL
/// - `GET|PUT /ttl/resources/:resource` - Read or override a resource TTL
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/entries/:key",
            get(get_entry_handler)
                .put(set_entry_handler)
                .delete(delete_entry_handler),
        )
        .route("/entries", delete(clear_handler))
        .route("/resources/:resource", delete(invalidate_handler))
        .route("/enabled", put(set_enabled_handler))
        .route("/ttl/default", put(set_default_ttl_handler))
        .route(
            "/ttl/resources/:resource",
            get(get_resource_ttl_handler).put(set_resource_ttl_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

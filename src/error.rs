//! Error types for the response cache
//!
//! Misses, expired entries and a disabled cache are never errors; they are
//! reported as `None`. These variants cover misuse and bad configuration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the response cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// TTL is zero or longer than the accepted maximum
    #[error(
        "Invalid TTL: {0} seconds (must be greater than zero and at most {max})",
        max = crate::cache::MAX_TTL_SECONDS
    )]
    InvalidTtl(u64),

    /// Key is empty or too long
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed admin request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Admin lookup of a key that is not cached
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidTtl(_)
            | CacheError::InvalidKey(_)
            | CacheError::InvalidConfig(_)
            | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the response cache.
pub type Result<T> = std::result::Result<T, CacheError>;

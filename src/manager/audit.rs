//! Audit hook for notable cache operations.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Operation being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheAction {
    Invalidate,
    Clear,
}

impl CacheAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheAction::Invalidate => "invalidate",
            CacheAction::Clear => "clear",
        }
    }
}

impl fmt::Display for CacheAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of cache audit records.
///
/// Called once per audited operation, never once per affected entry.
pub trait AuditSink: Send + Sync {
    fn log_cache_operation(
        &self,
        resource_type: &str,
        action: CacheAction,
        request_id: &str,
        resource_id: Option<&str>,
        details: Option<&Value>,
    );
}

/// Writes audit records as structured `tracing` events on the
/// `cache_audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn log_cache_operation(
        &self,
        resource_type: &str,
        action: CacheAction,
        request_id: &str,
        resource_id: Option<&str>,
        details: Option<&Value>,
    ) {
        info!(
            target: "cache_audit",
            resource_type,
            action = action.as_str(),
            request_id,
            resource_id = resource_id.unwrap_or("-"),
            details = %details.map(|d| d.to_string()).unwrap_or_default(),
            "cache operation"
        );
    }
}

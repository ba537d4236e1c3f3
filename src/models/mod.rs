//! Request and Response models for the admin API

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{EnabledRequest, SetEntryRequest, TtlRequest};
pub use responses::{
    DeleteResponse, EntryResponse, HealthResponse, InvalidateResponse, MessageResponse,
    ResourceTtlResponse, SetResponse, SettingsResponse,
};

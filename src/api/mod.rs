//! API Module
//!
//! Admin HTTP surface over the process-wide cache manager.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! Background Tasks Module
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries at a configured interval

mod sweep;

pub use sweep::SweepTask;

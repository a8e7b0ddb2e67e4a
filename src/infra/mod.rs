//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod notify;
pub mod store;
pub mod telemetry;

//! Scribe Infrastructure Library
//!
//! This crate provides shared infrastructure components used by the Scribe service:
//! - Middleware (request ID)
//! - Telemetry initialization
//! - Deferred session cleanup

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "cleanup")]
pub mod cleanup;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};

#[cfg(feature = "observability-basic")]
pub use telemetry::init_telemetry;

#[cfg(feature = "cleanup")]
pub use cleanup::CleanupScheduler;

//! Scribe API Library
//!
//! This crate provides the HTTP handlers, the upload session service and the
//! application setup for the batch transcription server.

mod api_doc;
mod handlers;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use handlers::upload::UploadResponse;
pub use state::AppState;

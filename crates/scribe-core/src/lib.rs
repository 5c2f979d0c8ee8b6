//! Scribe Core Library
//!
//! This crate provides the configuration, error types and domain models shared by
//! every Scribe component: storage, the transcription pipeline and the HTTP API.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{is_artifact_name, Credential, SessionId};

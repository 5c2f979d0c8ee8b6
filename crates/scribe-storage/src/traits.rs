//! Storage abstraction trait
//!
//! This module defines the SessionStorage trait that storage backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use scribe_core::{AppError, SessionId};
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Storage failures that reach a handler directly (the download route). Callers that
/// need a more specific message map the error themselves.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => AppError::NotFound("File not found".to_string()),
            StorageError::InvalidKey(_) => AppError::BadRequest("Invalid filename".to_string()),
            StorageError::WriteFailed(msg)
            | StorageError::ReadFailed(msg)
            | StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::IoError(e) => AppError::Internal(format!("IO error: {}", e)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage for upload sessions and their combined transcript artifacts.
///
/// A session owns one input directory holding the uploaded audio files and at most one
/// artifact. Artifacts are addressed by name (`transcript_<session>.txt`) so the
/// download route can find them without knowing the session.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Create the input directory for `session` and return its path
    async fn create_session(&self, session: &SessionId) -> StorageResult<PathBuf>;

    /// Store the `index`-th uploaded file of a session and return the stored path.
    ///
    /// The stored name is derived from `filename` reduced to its base name and prefixed
    /// with the upload position, so two uploads with the same name do not collide.
    async fn save_input(
        &self,
        session: &SessionId,
        index: usize,
        filename: &str,
        data: Bytes,
    ) -> StorageResult<PathBuf>;

    /// Write the combined transcript for `session` and return the artifact name
    async fn write_artifact(&self, session: &SessionId, contents: &str) -> StorageResult<String>;

    /// Read an artifact by name
    async fn read_artifact(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Remove the session's input directory and its artifact.
    ///
    /// Missing files are not an error: a purge may run for a batch that failed before
    /// any artifact was written.
    async fn purge_session(&self, session: &SessionId) -> StorageResult<()>;
}

//! Scribe Storage Library
//!
//! This crate provides the storage abstraction for upload sessions and combined
//! transcript artifacts, and its local filesystem implementation.
//!
//! # Layout
//!
//! - **Inputs**: `{upload_dir}/{session_id}/{index}_{filename}`
//! - **Artifacts**: `{output_dir}/transcript_{session_id}.txt`
//!
//! File and artifact names are reduced to a safe base name by the `keys` module before
//! they touch the filesystem.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::base_name;
pub use local::LocalStorage;
pub use traits::{SessionStorage, StorageError, StorageResult};

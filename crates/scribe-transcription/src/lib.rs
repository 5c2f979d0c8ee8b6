//! Scribe Transcription Library
//!
//! The per-file transcription pipeline and its parallel orchestration:
//!
//! - [`assembly_ai`]: HTTP client for the AssemblyAI upload, job and status endpoints
//! - [`workflow`]: drives one file through upload, job creation and polling
//! - [`orchestrator`]: fans a batch out over a bounded set of workflows and joins them
//! - [`aggregator`]: formats the joined transcripts as one text document

pub mod aggregator;
pub mod assembly_ai;
pub mod error;
pub mod orchestrator;
pub mod provider;
pub mod workflow;

// Re-export commonly used types
pub use aggregator::combine;
pub use assembly_ai::AssemblyAiClient;
pub use error::TranscriptionError;
pub use orchestrator::{AudioInput, TranscriptionOrchestrator};
pub use provider::{JobId, JobState, JobStatus, TranscriptionProvider, UploadHandle};
pub use workflow::{transcribe_file, PollSettings, WorkflowStage};

//! Provider abstraction for the three remote calls the workflow issues.

use async_trait::async_trait;
use scribe_core::Credential;
use std::fmt;
use std::path::Path;

use crate::error::TranscriptionError;

/// Provider-side reference to uploaded audio bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadHandle(pub String);

impl fmt::Display for UploadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-side transcription job identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Queued,
    Processing,
    Completed,
    Error,
    Unknown(String),
}

impl JobState {
    pub fn parse(status: &str) -> Self {
        match status {
            "queued" => JobState::Queued,
            "processing" => JobState::Processing,
            "completed" => JobState::Completed,
            "error" => JobState::Error,
            other => JobState::Unknown(other.to_string()),
        }
    }
}

/// One observation of a job's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub state: JobState,
    /// Transcript text, present once the job completed
    pub text: Option<String>,
    /// Provider's failure reason when the job errored
    pub error: Option<String>,
}

/// Remote speech-to-text provider.
///
/// Implementations return the stage-specific [`TranscriptionError`] variant:
/// `Upload` from [`submit_audio`](Self::submit_audio), `JobCreation` from
/// [`create_job`](Self::create_job) and `Poll` from
/// [`fetch_job_status`](Self::fetch_job_status).
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Send the audio file at `path` to the provider
    async fn submit_audio(
        &self,
        path: &Path,
        credential: &Credential,
    ) -> Result<UploadHandle, TranscriptionError>;

    /// Start a transcription job for previously uploaded audio
    async fn create_job(
        &self,
        handle: &UploadHandle,
        credential: &Credential,
    ) -> Result<JobId, TranscriptionError>;

    /// Fetch the current state of a job
    async fn fetch_job_status(
        &self,
        job: &JobId,
        credential: &Credential,
    ) -> Result<JobStatus, TranscriptionError>;
}

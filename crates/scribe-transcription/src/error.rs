use std::time::Duration;
use thiserror::Error;

/// Failure of a single file's transcription, tagged with the stage that failed.
///
/// The display text of each variant is what the caller ultimately sees after the API
/// prefixes it with `Transcription failed: `.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("transcription creation failed: {0}")]
    JobCreation(String),

    #[error("transcription polling failed: {0}")]
    Poll(String),

    /// The provider reported the job as `error`
    #[error("transcription polling failed: transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("transcription polling failed: unknown status: {0}")]
    UnknownStatus(String),

    #[error("transcription polling failed: no terminal status after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The task driving the workflow panicked or was cancelled
    #[error("transcription task aborted: {0}")]
    Aborted(String),
}

impl TranscriptionError {
    /// Short stage label used in structured logs
    pub fn stage(&self) -> &'static str {
        match self {
            TranscriptionError::Upload(_) => "upload",
            TranscriptionError::JobCreation(_) => "create_job",
            TranscriptionError::Poll(_)
            | TranscriptionError::TranscriptionFailed(_)
            | TranscriptionError::UnknownStatus(_)
            | TranscriptionError::Timeout(_) => "poll",
            TranscriptionError::Aborted(_) => "join",
        }
    }
}

impl From<TranscriptionError> for scribe_core::AppError {
    fn from(err: TranscriptionError) -> Self {
        scribe_core::AppError::Transcription(err.to_string())
    }
}

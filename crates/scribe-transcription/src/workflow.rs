//! Per-file transcription workflow: upload, create job, poll until terminal.

use scribe_core::{Config, Credential};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::error::TranscriptionError;
use crate::provider::{JobState, TranscriptionProvider};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(3600);

/// Polling cadence and deadline for one job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// `None` polls until the provider reports a terminal state
    pub max_wait: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: Some(DEFAULT_MAX_WAIT),
        }
    }
}

impl PollSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.poll_interval(),
            max_wait: config.max_wait(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Uploading,
    JobCreating,
    Polling,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::Uploading => "uploading",
            WorkflowStage::JobCreating => "job_creating",
            WorkflowStage::Polling => "polling",
        };
        f.write_str(name)
    }
}

/// Transcribe a single audio file and return its text.
///
/// Each step only runs when the previous one succeeded. While the job is queued or
/// processing the workflow sleeps `poll.interval` between status checks; once
/// `poll.max_wait` has elapsed without a terminal state it gives up with
/// [`TranscriptionError::Timeout`].
pub async fn transcribe_file<P>(
    provider: &P,
    path: &Path,
    credential: &Credential,
    poll: PollSettings,
) -> Result<String, TranscriptionError>
where
    P: TranscriptionProvider + ?Sized,
{
    tracing::debug!(stage = %WorkflowStage::Uploading, path = %path.display(), "Uploading audio");
    let handle = provider.submit_audio(path, credential).await?;

    tracing::debug!(stage = %WorkflowStage::JobCreating, path = %path.display(), "Audio uploaded, creating transcription job");
    let job = provider.create_job(&handle, credential).await?;

    tracing::info!(
        stage = %WorkflowStage::Polling,
        transcript_id = %job,
        path = %path.display(),
        "Transcription started, polling for completion"
    );

    let started = Instant::now();
    let deadline = poll.max_wait.map(|max_wait| started + max_wait);

    loop {
        let status = provider.fetch_job_status(&job, credential).await?;

        match status.state {
            JobState::Completed => {
                let text = status.text.unwrap_or_default();
                tracing::info!(
                    transcript_id = %job,
                    text_length = text.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Transcription completed"
                );
                return Ok(text);
            }
            JobState::Error => {
                return Err(TranscriptionError::TranscriptionFailed(
                    status.error.unwrap_or_else(|| "Unknown error".to_string()),
                ));
            }
            JobState::Unknown(other) => {
                return Err(TranscriptionError::UnknownStatus(other));
            }
            JobState::Queued | JobState::Processing => {
                let wait = match deadline {
                    Some(deadline) => {
                        let now = Instant::now();
                        if now >= deadline {
                            tracing::warn!(transcript_id = %job, "Transcription did not finish before the deadline");
                            return Err(TranscriptionError::Timeout(poll.max_wait.unwrap_or_default()));
                        }
                        poll.interval.min(deadline - now)
                    }
                    None => poll.interval,
                };
                tracing::trace!(transcript_id = %job, state = ?status.state, "Job not finished yet");
                sleep(wait).await;
            }
        }
    }
}

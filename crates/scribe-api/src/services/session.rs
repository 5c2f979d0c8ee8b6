//! Upload session lifecycle: store inputs, transcribe, write the combined artifact and
//! schedule the purge once the batch ends.

use bytes::Bytes;
use chrono::Utc;
use scribe_core::{AppError, Credential, SessionId};
use scribe_infra::CleanupScheduler;
use scribe_storage::{base_name, SessionStorage, StorageError};
use scribe_transcription::{combine, AudioInput, TranscriptionOrchestrator};
use std::sync::Arc;
use std::time::Instant;

use crate::state::AppState;

/// One `files` part of the upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Outcome of a successful batch
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub session_id: SessionId,
    pub artifact_name: String,
}

pub struct TranscriptionSessionService {
    storage: Arc<dyn SessionStorage>,
    orchestrator: TranscriptionOrchestrator,
    cleanup: CleanupScheduler,
}

impl TranscriptionSessionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
            orchestrator: state.orchestrator.clone(),
            cleanup: state.cleanup.clone(),
        }
    }

    /// Run one upload batch end to end.
    ///
    /// No artifact is written unless every file was transcribed. Once the session
    /// directory exists the purge is scheduled when the batch ends, successful or not,
    /// so the retention window always counts from the end of the upload.
    #[tracing::instrument(skip(self, files, credential), fields(files = files.len(), session_id = tracing::field::Empty))]
    pub async fn run(
        &self,
        files: Vec<UploadedFile>,
        credential: &Credential,
    ) -> Result<SessionOutcome, AppError> {
        let session_id = SessionId::generate();
        tracing::Span::current().record("session_id", tracing::field::display(&session_id));

        self.storage
            .create_session(&session_id)
            .await
            .map_err(|e| storage_failure(e, "Failed to create upload directory"))?;

        let outcome = self.process(&session_id, files, credential).await;
        self.cleanup.schedule(session_id.clone());

        let artifact_name = outcome?;
        Ok(SessionOutcome {
            session_id,
            artifact_name,
        })
    }

    /// Store, transcribe and combine; returns the artifact name
    async fn process(
        &self,
        session_id: &SessionId,
        files: Vec<UploadedFile>,
        credential: &Credential,
    ) -> Result<String, AppError> {
        let started = Instant::now();
        let inputs = self.store_inputs(session_id, files).await?;

        let transcripts = self
            .orchestrator
            .transcribe_all(&inputs, credential)
            .await?;

        let names: Vec<&str> = inputs.iter().map(|i| i.display_name.as_str()).collect();
        let combined = combine(&transcripts, &names, Utc::now());

        let artifact_name = self
            .storage
            .write_artifact(session_id, &combined)
            .await
            .map_err(|e| storage_failure(e, "Failed to save transcript"))?;

        tracing::info!(
            session_id = %session_id,
            artifact = %artifact_name,
            files = inputs.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Transcription session completed"
        );

        Ok(artifact_name)
    }

    async fn store_inputs(
        &self,
        session_id: &SessionId,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<AudioInput>, AppError> {
        let mut inputs = Vec::with_capacity(files.len());

        for (index, file) in files.into_iter().enumerate() {
            let display_name = base_name(&file.file_name).to_string();
            let path = self
                .storage
                .save_input(session_id, index, &file.file_name, file.data)
                .await
                .map_err(|e| match e {
                    StorageError::InvalidKey(_) => {
                        AppError::BadRequest(format!("Invalid file name: {}", file.file_name))
                    }
                    other => storage_failure(other, "Failed to save uploaded file"),
                })?;

            inputs.push(AudioInput::new(path, display_name));
        }

        Ok(inputs)
    }
}

/// Log the storage detail and hand the caller a generic message
fn storage_failure(err: StorageError, message: &str) -> AppError {
    tracing::error!(error = %err, "{}", message);
    AppError::Storage(message.to_string())
}

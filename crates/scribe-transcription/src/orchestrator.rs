//! Parallel fan-out of per-file workflows with an all-or-nothing join.

use futures::future::join_all;
use scribe_core::Credential;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::error::TranscriptionError;
use crate::provider::TranscriptionProvider;
use crate::workflow::{transcribe_file, PollSettings};

pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// One stored audio file in upload order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInput {
    pub path: PathBuf,
    /// Name shown in the combined transcript (the original upload's base name)
    pub display_name: String,
}

impl AudioInput {
    pub fn new(path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Clone)]
pub struct TranscriptionOrchestrator {
    provider: Arc<dyn TranscriptionProvider>,
    poll: PollSettings,
    max_concurrent: usize,
}

impl TranscriptionOrchestrator {
    pub fn new(
        provider: Arc<dyn TranscriptionProvider>,
        poll: PollSettings,
        max_concurrent: usize,
    ) -> Self {
        Self {
            provider,
            poll,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Transcribe every input and return the texts in input order.
    ///
    /// One task is spawned per input; at most `max_concurrent` of them run a workflow
    /// at the same time. The call returns only after every task finished. If any
    /// workflow failed, the error of the earliest failing input is returned and no
    /// texts are.
    #[tracing::instrument(skip(self, inputs, credential), fields(files = inputs.len(), max_concurrent = self.max_concurrent))]
    pub async fn transcribe_all(
        &self,
        inputs: &[AudioInput],
        credential: &Credential,
    ) -> Result<Vec<String>, TranscriptionError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));

        let handles: Vec<_> = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                let provider = self.provider.clone();
                let semaphore = semaphore.clone();
                let credential = credential.clone();
                let poll = self.poll;
                let path = input.path.clone();
                let span = tracing::info_span!("transcribe_file", index, file = %input.display_name);

                tokio::spawn(
                    async move {
                        let _permit = semaphore
                            .acquire_owned()
                            .await
                            .map_err(|e| TranscriptionError::Aborted(e.to_string()))?;

                        let result =
                            transcribe_file(provider.as_ref(), &path, &credential, poll).await;

                        match &result {
                            Ok(_) => tracing::info!(path = %path.display(), "Successfully transcribed"),
                            Err(e) => tracing::error!(
                                path = %path.display(),
                                stage = e.stage(),
                                error = %e,
                                "Error transcribing file"
                            ),
                        }

                        result
                    }
                    .instrument(span),
                )
            })
            .collect();

        // Every task is joined before any outcome is inspected
        let outcomes = join_all(handles).await;

        let mut transcripts = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            let result = outcome.unwrap_or_else(|join_error| {
                tracing::error!(index, error = %join_error, "Transcription task did not complete");
                Err(TranscriptionError::Aborted(join_error.to_string()))
            });
            transcripts.push(result?);
        }

        tracing::info!(
            files = transcripts.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "All files transcribed"
        );

        Ok(transcripts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{JobId, JobState, JobStatus, UploadHandle};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Per-file behaviour, keyed by the file's path
    #[derive(Clone)]
    enum Script {
        Complete { text: &'static str, delay_ms: u64 },
        FailUpload(&'static str),
        Status(&'static str),
        Panic,
    }

    struct FakeProvider {
        scripts: HashMap<String, Script>,
        running: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeProvider {
        fn new(scripts: Vec<(&str, Script)>) -> Self {
            Self {
                scripts: scripts
                    .into_iter()
                    .map(|(name, script)| (name.to_string(), script))
                    .collect(),
                running: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }

        fn script(&self, key: &str) -> Script {
            self.scripts[key].clone()
        }
    }

    #[async_trait]
    impl TranscriptionProvider for FakeProvider {
        async fn submit_audio(
            &self,
            path: &Path,
            _credential: &Credential,
        ) -> Result<UploadHandle, TranscriptionError> {
            let key = path.to_string_lossy().to_string();
            match self.script(&key) {
                Script::FailUpload(msg) => Err(TranscriptionError::Upload(msg.to_string())),
                Script::Panic => panic!("provider blew up"),
                _ => Ok(UploadHandle(key)),
            }
        }

        async fn create_job(
            &self,
            handle: &UploadHandle,
            _credential: &Credential,
        ) -> Result<JobId, TranscriptionError> {
            Ok(JobId(handle.0.clone()))
        }

        async fn fetch_job_status(
            &self,
            job: &JobId,
            _credential: &Credential,
        ) -> Result<JobStatus, TranscriptionError> {
            match self.script(&job.0) {
                Script::Complete { text, delay_ms } => {
                    let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
                    self.peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    self.running.fetch_sub(1, Ordering::SeqCst);
                    Ok(JobStatus {
                        state: JobState::Completed,
                        text: Some(text.to_string()),
                        error: None,
                    })
                }
                Script::Status(status) => Ok(JobStatus {
                    state: JobState::parse(status),
                    text: None,
                    error: None,
                }),
                _ => unreachable!(),
            }
        }
    }

    fn orchestrator(provider: Arc<FakeProvider>, max_concurrent: usize) -> TranscriptionOrchestrator {
        TranscriptionOrchestrator::new(
            provider,
            PollSettings {
                interval: Duration::from_millis(5),
                max_wait: Some(Duration::from_secs(5)),
            },
            max_concurrent,
        )
    }

    fn inputs(names: &[&str]) -> Vec<AudioInput> {
        names.iter().map(|n| AudioInput::new(*n, *n)).collect()
    }

    fn credential() -> Credential {
        Credential::new("test-key").unwrap()
    }

    #[tokio::test]
    async fn test_order_preserved_when_completion_order_differs() {
        let provider = Arc::new(FakeProvider::new(vec![
            ("a.mp3", Script::Complete { text: "first", delay_ms: 60 }),
            ("b.mp3", Script::Complete { text: "second", delay_ms: 5 }),
            ("c.mp3", Script::Complete { text: "third", delay_ms: 30 }),
        ]));

        let texts = orchestrator(provider, 8)
            .transcribe_all(&inputs(&["a.mp3", "b.mp3", "c.mp3"]), &credential())
            .await
            .unwrap();

        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_empty_input_returns_empty() {
        let provider = Arc::new(FakeProvider::new(vec![]));
        let texts = orchestrator(provider, 8)
            .transcribe_all(&[], &credential())
            .await
            .unwrap();
        assert!(texts.is_empty());
    }

    #[tokio::test]
    async fn test_single_failure_fails_batch() {
        let provider = Arc::new(FakeProvider::new(vec![
            ("a.mp3", Script::Complete { text: "ok", delay_ms: 1 }),
            ("b.mp3", Script::FailUpload("status 401: Invalid API key")),
        ]));

        let err = orchestrator(provider, 8)
            .transcribe_all(&inputs(&["a.mp3", "b.mp3"]), &credential())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TranscriptionError::Upload("status 401: Invalid API key".into())
        );
    }

    #[tokio::test]
    async fn test_first_error_in_input_order_wins() {
        let provider = Arc::new(FakeProvider::new(vec![
            ("a.mp3", Script::Complete { text: "ok", delay_ms: 1 }),
            ("b.mp3", Script::Status("paused")),
            ("c.mp3", Script::FailUpload("status 500: down")),
        ]));

        let err = orchestrator(provider, 8)
            .transcribe_all(&inputs(&["a.mp3", "b.mp3", "c.mp3"]), &credential())
            .await
            .unwrap_err();

        assert_eq!(err, TranscriptionError::UnknownStatus("paused".into()));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let names = ["1.mp3", "2.mp3", "3.mp3", "4.mp3", "5.mp3", "6.mp3"];
        let provider = Arc::new(FakeProvider::new(
            names
                .iter()
                .map(|n| (*n, Script::Complete { text: "x", delay_ms: 20 }))
                .collect(),
        ));

        let texts = orchestrator(provider.clone(), 2)
            .transcribe_all(&inputs(&names), &credential())
            .await
            .unwrap();

        assert_eq!(texts.len(), names.len());
        assert!(provider.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_panicking_workflow_reported_as_aborted() {
        let provider = Arc::new(FakeProvider::new(vec![
            ("a.mp3", Script::Complete { text: "ok", delay_ms: 1 }),
            ("b.mp3", Script::Panic),
        ]));

        let err = orchestrator(provider, 8)
            .transcribe_all(&inputs(&["a.mp3", "b.mp3"]), &credential())
            .await
            .unwrap_err();

        assert!(matches!(err, TranscriptionError::Aborted(_)));
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let provider = Arc::new(FakeProvider::new(vec![]));
        assert_eq!(orchestrator(provider, 0).max_concurrent(), 1);
    }
}

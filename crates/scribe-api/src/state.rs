use scribe_core::Config;
use scribe_infra::CleanupScheduler;
use scribe_storage::SessionStorage;
use scribe_transcription::TranscriptionOrchestrator;
use std::sync::Arc;

/// Shared application state, handed to handlers as `State<Arc<AppState>>`
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn SessionStorage>,
    pub orchestrator: TranscriptionOrchestrator,
    pub cleanup: CleanupScheduler,
}

//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use scribe_core::Config;
use scribe_infra::CleanupScheduler;
use scribe_storage::LocalStorage;
use scribe_transcription::{AssemblyAiClient, PollSettings, TranscriptionOrchestrator};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    scribe_infra::init_telemetry(config.log_format())?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(&config).await?;
    let router = routes::build_router(&config, state.clone())?;

    Ok((state, router))
}

/// Create storage, the provider client and the cleanup scheduler
pub async fn build_state(config: &Config) -> Result<Arc<AppState>> {
    let storage = Arc::new(
        LocalStorage::new(config.upload_dir(), config.output_dir())
            .await
            .context("Failed to prepare storage directories")?,
    );
    tracing::info!(
        upload_dir = %storage.upload_dir().display(),
        output_dir = %storage.output_dir().display(),
        "Local storage ready"
    );

    let client = AssemblyAiClient::from_config(config)?;
    let orchestrator = TranscriptionOrchestrator::new(
        Arc::new(client),
        PollSettings::from_config(config),
        config.max_concurrent_transcriptions(),
    );

    let cleanup = CleanupScheduler::new(storage.clone(), config.artifact_retention());

    Ok(Arc::new(AppState {
        config: config.clone(),
        storage,
        orchestrator,
        cleanup,
    }))
}

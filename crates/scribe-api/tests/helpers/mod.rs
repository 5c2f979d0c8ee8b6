//! Test helpers: build AppState and router for integration tests.
//!
//! The AssemblyAI endpoints are served by a mockito server and storage lives in a
//! temporary directory, so the tests need neither network access nor an API key.

#![allow(dead_code)]

pub mod provider;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use bytes::Bytes;
use mockito::ServerGuard;
use scribe_api::setup;
use scribe_api::AppState;
use scribe_core::{Config, ServiceConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const API_KEY: &str = "test-api-key";

/// Test application: server, provider mock, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub provider: ServerGuard,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> PathBuf {
        self._temp_dir.path().join("uploads")
    }

    pub fn output_dir(&self) -> PathBuf {
        self._temp_dir.path().join("outputs")
    }

    /// Names of the files currently in the output directory
    pub fn artifacts(&self) -> Vec<String> {
        std::fs::read_dir(self.output_dir())
            .expect("read output dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().to_string())
            .collect()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Build the app with extra environment overrides
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let provider = mockito::Server::new_async().await;
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut vars: HashMap<String, String> = HashMap::from([
        (
            "UPLOAD_DIR".to_string(),
            temp_dir.path().join("uploads").to_string_lossy().to_string(),
        ),
        (
            "OUTPUT_DIR".to_string(),
            temp_dir.path().join("outputs").to_string_lossy().to_string(),
        ),
        ("ASSEMBLYAI_BASE_URL".to_string(), provider.url()),
        ("TRANSCRIPTION_POLL_INTERVAL_MS".to_string(), "10".to_string()),
        ("TRANSCRIPTION_MAX_WAIT_SECS".to_string(), "5".to_string()),
        ("UPLOAD_TIMEOUT_SECS".to_string(), "5".to_string()),
        ("REQUEST_TIMEOUT_SECS".to_string(), "5".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = Config(Box::new(
        ServiceConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test config"),
    ));

    let state = setup::build_state(&config)
        .await
        .expect("Failed to build state");
    let app = setup::routes::build_router(&config, state.clone()).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        provider,
        _temp_dir: temp_dir,
    }
}

/// Multipart form with an optional API key and `(name, contents)` audio parts
pub fn upload_form(api_key: Option<&str>, files: &[(&str, &str)]) -> MultipartForm {
    let mut form = MultipartForm::new();
    if let Some(key) = api_key {
        form = form.add_text("apiKey", key.to_string());
    }
    for (name, contents) in files {
        let part = Part::bytes(Bytes::from(contents.to_string()))
            .file_name(name.to_string())
            .mime_type("audio/mpeg");
        form = form.add_part("files", part);
    }
    form
}

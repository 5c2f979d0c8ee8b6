// AssemblyAI client for audio transcription

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Body, Client, Response};
use scribe_core::{Config, Credential};
use serde::Deserialize;
use serde_json::json;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;
use std::time::Duration;
use tokio_util::io::ReaderStream;

use crate::error::TranscriptionError;
use crate::provider::{JobId, JobState, JobStatus, TranscriptionProvider, UploadHandle};

pub const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com";

/// AssemblyAI REST client
///
/// Uploads use their own HTTP client so long audio files get a longer timeout than
/// job creation and status checks.
#[derive(Clone)]
pub struct AssemblyAiClient {
    base_url: String,
    upload_client: Client,
    http_client: Client,
}

impl Debug for AssemblyAiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AssemblyAiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AssemblyAiClient {
    pub fn new(
        base_url: impl Into<String>,
        upload_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let upload_client = Client::builder()
            .timeout(upload_timeout)
            .build()
            .context("Failed to create upload HTTP client for AssemblyAI")?;

        let http_client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to create HTTP client for AssemblyAI")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            upload_client,
            http_client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.assemblyai_base_url(),
            config.upload_timeout(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn authorization(credential: &Credential) -> Result<HeaderValue, String> {
    let mut value = HeaderValue::from_str(credential.expose())
        .map_err(|_| "API key contains characters not allowed in a header".to_string())?;
    value.set_sensitive(true);
    Ok(value)
}

/// Turns a non-2xx response into `status <code>: <body>`
async fn reject_unsuccessful(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(format!("status {}: {}", status.as_u16(), error_text))
}

#[async_trait]
impl TranscriptionProvider for AssemblyAiClient {
    async fn submit_audio(
        &self,
        path: &Path,
        credential: &Credential,
    ) -> Result<UploadHandle, TranscriptionError> {
        let auth = authorization(credential).map_err(TranscriptionError::Upload)?;

        let file = tokio::fs::File::open(path).await.map_err(|e| {
            TranscriptionError::Upload(format!("failed to open {}: {}", path.display(), e))
        })?;

        let response = self
            .upload_client
            .post(self.url("/v2/upload"))
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await
            .map_err(|e| TranscriptionError::Upload(e.to_string()))?;

        let response = reject_unsuccessful(response)
            .await
            .map_err(TranscriptionError::Upload)?;

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Upload(format!("invalid response: {}", e)))?;

        Ok(UploadHandle(upload.upload_url))
    }

    async fn create_job(
        &self,
        handle: &UploadHandle,
        credential: &Credential,
    ) -> Result<JobId, TranscriptionError> {
        let auth = authorization(credential).map_err(TranscriptionError::JobCreation)?;

        let response = self
            .http_client
            .post(self.url("/v2/transcript"))
            .header(AUTHORIZATION, auth)
            .json(&json!({ "audio_url": handle.0 }))
            .send()
            .await
            .map_err(|e| TranscriptionError::JobCreation(e.to_string()))?;

        let response = reject_unsuccessful(response)
            .await
            .map_err(TranscriptionError::JobCreation)?;

        let transcript: TranscriptResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::JobCreation(format!("invalid response: {}", e)))?;

        Ok(JobId(transcript.id))
    }

    async fn fetch_job_status(
        &self,
        job: &JobId,
        credential: &Credential,
    ) -> Result<JobStatus, TranscriptionError> {
        let auth = authorization(credential).map_err(TranscriptionError::Poll)?;

        let response = self
            .http_client
            .get(self.url(&format!("/v2/transcript/{}", job.0)))
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| TranscriptionError::Poll(e.to_string()))?;

        let response = reject_unsuccessful(response)
            .await
            .map_err(TranscriptionError::Poll)?;

        let transcript: TranscriptResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Poll(format!("invalid response: {}", e)))?;

        Ok(JobStatus {
            state: JobState::parse(&transcript.status),
            text: transcript.text,
            error: transcript.error,
        })
    }
}

// AssemblyAI API response types
#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    id: String,
    #[serde(default)]
    status: String,
    text: Option<String>,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AssemblyAiClient::new(
            "http://localhost:1234/",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(client.url("/v2/upload"), "http://localhost:1234/v2/upload");
    }

    #[test]
    fn test_authorization_header_is_sensitive() {
        let credential = Credential::new("key-123").unwrap();
        let value = authorization(&credential).unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "key-123");
    }

    #[test]
    fn test_authorization_rejects_control_characters() {
        let credential = Credential::new("key\u{7f}123").unwrap();
        assert!(authorization(&credential).is_err());
    }

    #[test]
    fn test_debug_does_not_list_clients() {
        let client = AssemblyAiClient::new(
            DEFAULT_BASE_URL,
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("api.assemblyai.com"));
    }
}

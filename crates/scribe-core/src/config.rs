//! Configuration module
//!
//! This module provides configuration structures for the API server, local storage,
//! the transcription provider and the artifact lifecycle. Values come from environment
//! variables (optionally loaded from a `.env` file) with defaults for everything except
//! what has to be chosen per deployment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const ASSEMBLYAI_BASE_URL: &str = "https://api.assemblyai.com";
const POLL_INTERVAL_MS: u64 = 3000;
const MAX_WAIT_SECS: u64 = 3600;
const MAX_CONCURRENT_TRANSCRIPTIONS: usize = 8;
const UPLOAD_TIMEOUT_SECS: u64 = 300;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const ARTIFACT_RETENTION_SECS: u64 = 600;

/// Log output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Transcription service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    // Local storage layout
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_upload_size_bytes: usize,
    // Transcription provider
    pub assemblyai_base_url: String,
    pub poll_interval: Duration,
    /// Upper bound on polling a single job. `None` polls until a terminal state.
    pub max_wait: Option<Duration>,
    pub max_concurrent_transcriptions: usize,
    pub upload_timeout: Duration,
    pub request_timeout: Duration,
    // Artifact lifecycle
    pub artifact_retention: Duration,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.inner().upload_dir
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.inner().output_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn assemblyai_base_url(&self) -> &str {
        &self.inner().assemblyai_base_url
    }

    pub fn poll_interval(&self) -> Duration {
        self.inner().poll_interval
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.inner().max_wait
    }

    pub fn max_concurrent_transcriptions(&self) -> usize {
        self.inner().max_concurrent_transcriptions
    }

    pub fn upload_timeout(&self) -> Duration {
        self.inner().upload_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.inner().request_timeout
    }

    pub fn artifact_retention(&self) -> Duration {
        self.inner().artifact_retention
    }
}

fn is_production_env(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format: LogFormat::parse(&lookup("LOG_FORMAT").unwrap_or_default()),
        };

        let max_wait_secs = lookup("TRANSCRIPTION_MAX_WAIT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(MAX_WAIT_SECS);

        let config = ServiceConfig {
            base,
            upload_dir: PathBuf::from(lookup("UPLOAD_DIR").unwrap_or_else(|| "./uploads".into())),
            output_dir: PathBuf::from(lookup("OUTPUT_DIR").unwrap_or_else(|| "./outputs".into())),
            max_upload_size_bytes: lookup("MAX_UPLOAD_SIZE_MB")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(MAX_UPLOAD_SIZE_MB)
                * 1024
                * 1024,
            assemblyai_base_url: lookup("ASSEMBLYAI_BASE_URL")
                .unwrap_or_else(|| ASSEMBLYAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            poll_interval: Duration::from_millis(
                lookup("TRANSCRIPTION_POLL_INTERVAL_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(POLL_INTERVAL_MS),
            ),
            max_wait: (max_wait_secs > 0).then(|| Duration::from_secs(max_wait_secs)),
            max_concurrent_transcriptions: lookup("MAX_CONCURRENT_TRANSCRIPTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONCURRENT_TRANSCRIPTIONS),
            upload_timeout: Duration::from_secs(
                lookup("UPLOAD_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(UPLOAD_TIMEOUT_SECS),
            ),
            request_timeout: Duration::from_secs(
                lookup("REQUEST_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(REQUEST_TIMEOUT_SECS),
            ),
            artifact_retention: Duration::from_secs(
                lookup("ARTIFACT_RETENTION_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(ARTIFACT_RETENTION_SECS),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_concurrent_transcriptions == 0 {
            return Err(anyhow::anyhow!(
                "MAX_CONCURRENT_TRANSCRIPTIONS must be at least 1"
            ));
        }

        if self.poll_interval.is_zero() {
            return Err(anyhow::anyhow!(
                "TRANSCRIPTION_POLL_INTERVAL_MS must be greater than zero"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        if !(self.assemblyai_base_url.starts_with("http://")
            || self.assemblyai_base_url.starts_with("https://"))
        {
            return Err(anyhow::anyhow!(
                "ASSEMBLYAI_BASE_URL must be an http(s) URL"
            ));
        }

        Ok(())
    }
}

//! JSON error responses.
//!
//! Handlers return `Result<_, HttpAppError>`. Anything convertible into `AppError`
//! (storage and transcription errors included) can be propagated with `?` and is
//! rendered as an [`ErrorResponse`] with the status taken from [`ErrorMetadata`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scribe_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use utoipa::ToSchema;

/// Set from `Config::is_production` when the router is built
static PRODUCTION: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_production(production: bool) {
    PRODUCTION.store(production, Ordering::Relaxed);
}

/// Body of every non-2xx response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message, e.g. `No files uploaded`
    pub error: String,
    /// Display text and cause chain; omitted in production and for sensitive errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// `AppError` lives in scribe-core, so the axum response impl needs a local wrapper
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl<E> From<E> for HttpAppError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        HttpAppError(err.into())
    }
}

fn log(error: &AppError, status: StatusCode) {
    let kind = error.kind();
    let status = status.as_u16();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, kind, status, "Request rejected"),
        LogLevel::Warn => tracing::warn!(error = %error, kind, status, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, kind, status, "Request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        render(self.0, PRODUCTION.load(Ordering::Relaxed))
    }
}

fn render(error: AppError, production: bool) -> Response {
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    log(&error, status);

    let expose = !error.is_sensitive() && !production;
    let body = ErrorResponse {
        error: error.client_message(),
        details: expose.then(|| error.details()),
        error_type: expose.then(|| error.kind().to_string()),
        code: error.error_code().to_string(),
        recoverable: error.is_recoverable(),
        suggested_action: error.suggested_action().map(str::to_string),
    };

    (status, Json(body)).into_response()
}

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use scribe_core::{is_artifact_name, AppError};
use scribe_storage::base_name;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "transcription",
    params(
        ("filename" = String, Path, description = "Artifact name, `transcript_session_*.txt`")
    ),
    responses(
        (status = 200, description = "Combined transcript", content_type = "text/plain"),
        (status = 400, description = "Invalid filename", body = ErrorResponse),
        (status = 404, description = "Transcript not found or expired", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_transcript"))]
pub async fn download_transcript(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Only the last path segment is ever considered
    let name = base_name(&filename);
    if !is_artifact_name(name) {
        return Err(AppError::BadRequest("Invalid filename".to_string()).into());
    }

    let contents = state.storage.read_artifact(name).await?;

    tracing::debug!(artifact = %name, size_bytes = contents.len(), "Serving transcript");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", name),
        )
        .body(Body::from(contents))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::session::{TranscriptionSessionService, UploadedFile};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use scribe_core::constants::{CREDENTIAL_FIELD, DOWNLOAD_ROUTE_PREFIX, FILES_FIELD};
use scribe_core::{AppError, Credential};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

const INVALID_FORM: &str = "File too large or invalid form data";

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Relative URL of the combined transcript
    #[serde(rename = "downloadURL")]
    pub download_url: String,
}

/// Parsed upload form
struct UploadForm {
    api_key: Option<String>,
    files: Vec<UploadedFile>,
}

fn invalid_form(detail: impl std::fmt::Display) -> AppError {
    tracing::debug!(error = %detail, "Rejected multipart body");
    AppError::BadRequest(INVALID_FORM.to_string())
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm {
        api_key: None,
        files: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(CREDENTIAL_FIELD) => {
                form.api_key = Some(field.text().await.map_err(invalid_form)?);
            }
            Some(FILES_FIELD) => {
                // Parts without a file name are plain form values, not uploads
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let data = field.bytes().await.map_err(invalid_form)?;
                form.files.push(UploadedFile { file_name, data });
            }
            _ => {}
        }
    }

    Ok(form)
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "transcription",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "`apiKey` field with the AssemblyAI API key and one or more `files` parts"),
    responses(
        (status = 200, description = "All files transcribed", body = UploadResponse),
        (status = 400, description = "Missing API key, no files, or invalid form", body = ErrorResponse),
        (status = 500, description = "Storage or transcription failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_transcribe"))]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(invalid_form)?;
    let form = read_form(multipart).await?;

    let credential = Credential::new(form.api_key.unwrap_or_default())?;

    if form.files.is_empty() {
        return Err(AppError::InvalidInput("No files uploaded".to_string()).into());
    }

    tracing::info!(files = form.files.len(), "Processing files");

    let outcome = TranscriptionSessionService::new(&state)
        .run(form.files, &credential)
        .await?;

    Ok(Json(UploadResponse {
        message: "Transcription completed successfully".to_string(),
        download_url: format!("{}{}", DOWNLOAD_ROUTE_PREFIX, outcome.artifact_name),
    }))
}

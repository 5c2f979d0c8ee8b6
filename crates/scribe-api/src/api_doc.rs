//! OpenAPI documentation.

use axum::Json;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scribe API",
        version = "0.1.0",
        description = "Batch audio transcription. Upload several audio files with an AssemblyAI API key, receive one combined transcript to download. Transcripts are removed after the retention window."
    ),
    paths(
        handlers::upload::upload_files,
        handlers::download::download_transcript,
        handlers::health::health_check,
    ),
    components(schemas(
        ErrorResponse,
        handlers::upload::UploadResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "transcription", description = "Upload audio and download combined transcripts"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

//! Mocked AssemblyAI responses.

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

/// Mock one file's full happy path: upload (matched by body), job creation and a
/// completed status carrying `text`.
pub async fn mock_transcription(
    server: &mut ServerGuard,
    audio: &str,
    job_id: &str,
    text: &str,
) -> Vec<Mock> {
    let upload_url = format!("https://cdn.example/{}", job_id);

    let upload = server
        .mock("POST", "/v2/upload")
        .match_header("authorization", super::API_KEY)
        .match_body(audio)
        .with_status(200)
        .with_body(json!({ "upload_url": upload_url }).to_string())
        .create_async()
        .await;

    let create = server
        .mock("POST", "/v2/transcript")
        .match_header("authorization", super::API_KEY)
        .match_body(Matcher::Json(json!({ "audio_url": upload_url })))
        .with_status(200)
        .with_body(json!({ "id": job_id, "status": "queued" }).to_string())
        .create_async()
        .await;

    let poll = server
        .mock("GET", format!("/v2/transcript/{}", job_id).as_str())
        .match_header("authorization", super::API_KEY)
        .with_status(200)
        .with_body(json!({ "id": job_id, "status": "completed", "text": text }).to_string())
        .create_async()
        .await;

    vec![upload, create, poll]
}

/// Reject every upload with `status` and `body`
pub async fn mock_upload_rejected(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("POST", "/v2/upload")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}

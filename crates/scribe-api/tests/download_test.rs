//! Download API integration tests.
//!
//! Run with: `cargo test -p scribe-api --test download_test`

mod helpers;

use helpers::setup_test_app;
use serde_json::Value;

const ARTIFACT: &str = "transcript_session_1700000000_0a1b2c3d.txt";

#[tokio::test]
async fn test_download_existing_transcript() {
    let app = setup_test_app().await;
    std::fs::write(app.output_dir().join(ARTIFACT), "Combined Audio Transcription\n").unwrap();

    let response = app.client().get(&format!("/download/{}", ARTIFACT)).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        format!("attachment; filename={}", ARTIFACT)
    );
    assert_eq!(response.text(), "Combined Audio Transcription\n");
}

#[tokio::test]
async fn test_download_missing_transcript() {
    let app = setup_test_app().await;

    let response = app.client().get(&format!("/download/{}", ARTIFACT)).await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "File not found");
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn test_download_rejects_non_artifact_name() {
    let app = setup_test_app().await;
    std::fs::write(app.output_dir().join("notes.txt"), "private").unwrap();

    let response = app.client().get("/download/notes.txt").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid filename");
}

#[tokio::test]
async fn test_download_rejects_empty_session_part() {
    let app = setup_test_app().await;

    let response = app.client().get("/download/transcript_session_.txt").await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_download_rejects_encoded_traversal() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/download/..%2F..%2Fetc%2Fpasswd")
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_download_only_uses_last_segment() {
    let app = setup_test_app().await;
    std::fs::write(app.output_dir().join(ARTIFACT), "transcript").unwrap();

    let response = app
        .client()
        .get(&format!("/download/nested/dir/{}", ARTIFACT))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "transcript");
}

//! Error responses when the service is configured for production.
//!
//! Every app in this binary is built with `ENVIRONMENT=production`.
//!
//! Run with: `cargo test -p scribe-api --test production_test`

mod helpers;

use helpers::{setup_test_app_with, upload_form, API_KEY};
use serde_json::Value;

const PRODUCTION: &[(&str, &str)] = &[
    ("ENVIRONMENT", "production"),
    ("CORS_ORIGINS", "https://scribe.example.com"),
];

#[tokio::test]
async fn test_production_config_hides_error_details() {
    let app = setup_test_app_with(PRODUCTION).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(Some(API_KEY), &[]))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "No files uploaded");
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}

#[tokio::test]
async fn test_production_download_error_hides_details() {
    let app = setup_test_app_with(PRODUCTION).await;

    let response = app
        .client()
        .get("/download/transcript_session_1700000000_0a1b2c3d.txt")
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "File not found");
    assert!(body.get("details").is_none());
}

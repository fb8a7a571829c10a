//! Image uploads.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use sitedeck_admin::config::AdminConfig;
use sitedeck_integration_tests::TestServer;

fn image_form(bytes: Vec<u8>, mime: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name("logo.png")
        .mime_str(mime)
        .unwrap();
    Form::new().part("file", part)
}

#[tokio::test]
async fn test_upload_returns_data_url() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/api/media"))
        .multipart(image_form(b"\x89PNG".to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data_url"], "data:image/png;base64,iVBORw==");
    assert_eq!(body["file_name"], "logo.png");
    assert_eq!(body["size"], 4);
}

#[tokio::test]
async fn test_upload_rejects_non_images_and_oversize() {
    let server = TestServer::start_with(AdminConfig {
        max_upload_bytes: 16,
        ..AdminConfig::default()
    })
    .await;

    let resp = server
        .client
        .post(server.url("/api/media"))
        .multipart(image_form(b"hello".to_vec(), "text/plain"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let resp = server
        .client
        .post(server.url("/api/media"))
        .multipart(image_form(vec![0; 64], "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

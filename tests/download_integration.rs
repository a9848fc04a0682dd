//! Integration tests for the streaming download client.
//!
//! These tests verify streaming writes, timeout handling, strict PDF
//! checking, and the no-partial-file invariant with mock HTTP servers.

use std::time::Duration;

use pdf_finder::download::{DownloadError, HttpClient};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a mock server with a file endpoint.
async fn setup_mock_file(path_str: &str, content: &[u8]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(&server)
        .await;
    server
}

fn client() -> HttpClient {
    HttpClient::new(60, "pdf-finder/1.0", false)
}

#[tokio::test]
async fn test_download_streams_content_to_dest() {
    let content = b"%PDF-1.4 fake pdf body\nline 2\nline 3";
    let server = setup_mock_file("/document.pdf", content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("document.pdf");

    let url = format!("{}/document.pdf", server.uri());
    let bytes = client()
        .download(&url, &dest)
        .await
        .expect("download should succeed");

    assert_eq!(bytes, content.len() as u64);
    let written = std::fs::read(&dest).expect("should read file");
    assert_eq!(written, content);
}

#[tokio::test]
async fn test_download_404_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("missing.pdf");

    let url = format!("{}/missing.pdf", server.uri());
    let err = client()
        .download(&url, &dest)
        .await
        .expect_err("404 must fail");

    match err {
        DownloadError::HttpStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(!dest.exists(), "no file may be left behind on failure");
}

#[tokio::test]
async fn test_download_timeout_removes_partial_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"partial".to_vec())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("slow.pdf");

    let short_timeout_client = HttpClient::new(1, "pdf-finder/1.0", false);
    let url = format!("{}/slow.pdf", server.uri());
    let err = short_timeout_client
        .download(&url, &dest)
        .await
        .expect_err("download past the timeout must fail");

    assert!(
        matches!(err, DownloadError::Timeout { .. }),
        "expected Timeout, got {err:?}"
    );
    assert!(
        err.to_string().contains("timeout"),
        "error detail must mention the timeout: {err}"
    );
    assert!(
        !dest.exists(),
        "partial file must be removed after a timeout"
    );
}

#[tokio::test]
async fn test_download_invalid_url_rejected() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("x.pdf");

    let err = client()
        .download("not a url", &dest)
        .await
        .expect_err("invalid URL must fail");

    assert!(matches!(err, DownloadError::InvalidUrl { .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_strict_mode_rejects_html_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>interstitial</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("view.pdf");

    let strict_client = HttpClient::new(60, "pdf-finder/1.0", true);
    let url = format!("{}/view", server.uri());
    let err = strict_client
        .download(&url, &dest)
        .await
        .expect_err("strict mode must reject non-PDF responses");

    match err {
        DownloadError::NotPdf { content_type, .. } => {
            assert!(content_type.contains("text/html"));
        }
        other => panic!("expected NotPdf, got {other:?}"),
    }
    assert!(!dest.exists(), "no file may be created for rejected content");
}

#[tokio::test]
async fn test_strict_mode_accepts_pdf_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
        )
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("view.pdf");

    let strict_client = HttpClient::new(60, "pdf-finder/1.0", true);
    let url = format!("{}/view", server.uri());
    strict_client
        .download(&url, &dest)
        .await
        .expect("PDF content type must pass strict mode");
    assert!(dest.exists());
}

#[tokio::test]
async fn test_strict_mode_trusts_pdf_url_extension() {
    // A URL ending in .pdf is accepted even when the server mislabels the body.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paper.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/octet-stream")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
        )
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("paper.pdf");

    let strict_client = HttpClient::new(60, "pdf-finder/1.0", true);
    let url = format!("{}/paper.pdf", server.uri());
    strict_client
        .download(&url, &dest)
        .await
        .expect(".pdf URL must pass strict mode regardless of Content-Type");
}

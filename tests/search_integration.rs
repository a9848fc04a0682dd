//! Integration tests for the search API client.
//!
//! These tests verify query construction, pagination offsets, and the
//! typed parse boundary against a mock HTTP server.

use pdf_finder::search::{ApiError, SearchClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::new(format!("{}/search", server.uri()), "test-key", "test-cx")
}

#[tokio::test]
async fn test_search_parses_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "machine learning"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "link": "https://example.com/paper.pdf",
                    "title": "A Paper",
                    "snippet": "about things",
                    "mime": "application/pdf"
                },
                {
                    "link": "https://example.com/page.html",
                    "title": "A Page"
                }
            ],
            "queries": {"nextPage": [{"startIndex": 11}]}
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search("machine learning", 0)
        .await
        .expect("search should succeed");

    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].url, "https://example.com/paper.pdf");
    assert_eq!(page.results[0].title, "A Paper");
    assert_eq!(page.results[0].mime.as_deref(), Some("application/pdf"));
    assert_eq!(page.results[0].query, "machine learning");
    assert_eq!(page.results[0].source_page, 0);
    assert_eq!(page.results[1].snippet, None);
    assert_eq!(page.next_start, Some(11));
}

#[tokio::test]
async fn test_search_second_page_uses_offset_eleven() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"link": "https://example.com/second.pdf", "title": "Second"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search("anything", 1)
        .await
        .expect("search should succeed");

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].source_page, 1);
}

#[tokio::test]
async fn test_search_missing_items_is_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": {"totalResults": "0"}
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search("nothing here", 0)
        .await
        .expect("payload without items is a valid empty page");

    assert!(page.is_empty());
    assert_eq!(page.next_start, None);
}

#[tokio::test]
async fn test_search_non_2xx_is_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "Quota exceeded"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("quota", 0)
        .await
        .expect_err("403 must be an error");

    match err {
        ApiError::HttpStatus { status, query } => {
            assert_eq!(status, 403);
            assert_eq!(query, "quota");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_malformed_payload_is_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("this is not json at all"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("garbage", 0)
        .await
        .expect_err("unparseable body must be an error");

    assert!(
        matches!(err, ApiError::MalformedPayload { .. }),
        "expected MalformedPayload, got {err:?}"
    );
}

#[tokio::test]
async fn test_search_item_without_link_is_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"title": "no link field"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("bad item", 0)
        .await
        .expect_err("item without link must be rejected at the parse boundary");

    assert!(matches!(err, ApiError::MalformedPayload { .. }));
}

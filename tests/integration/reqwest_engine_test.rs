// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::StreamExt;
use mirrorcheck::engines::reqwest_engine::ReqwestEngine;
use mirrorcheck::engines::traits::{EngineError, FetchEngine};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine() -> ReqwestEngine {
    ReqwestEngine::new("mirrorcheck-test/0.1", Duration::from_secs(10)).unwrap()
}

#[tokio::test]
async fn test_fetch_page_returns_html_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloads/"))
        .and(header("user-agent", "mirrorcheck-test/0.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<a href=\"a.pdf\">a.pdf</a>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/downloads/", server.uri());
    let page = engine().fetch_page(&url).await.unwrap();

    assert_eq!(page.status_code, 200);
    assert!(page.is_html());
    assert_eq!(page.url, url);
    assert!(page.content.contains("a.pdf"));
}

#[tokio::test]
async fn test_fetch_page_skips_body_of_non_html_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloads/readme.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("plain text", "text/plain"))
        .mount(&server)
        .await;

    let page = engine()
        .fetch_page(&format!("{}/downloads/readme.txt", server.uri()))
        .await
        .unwrap();

    assert!(page.is_success());
    assert!(!page.is_html());
    assert!(page.content.is_empty());
}

#[tokio::test]
async fn test_fetch_page_treats_missing_content_type_as_leaf() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloads/firmware"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let page = engine()
        .fetch_page(&format!("{}/downloads/firmware", server.uri()))
        .await
        .unwrap();

    assert!(page.is_success());
    assert!(page.content_type.is_empty());
    assert!(!page.is_html());
    assert!(page.content.is_empty());
}

#[tokio::test]
async fn test_fetch_page_reports_error_status() {
    let server = MockServer::start().await;

    let page = engine()
        .fetch_page(&format!("{}/missing/", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.status_code, 404);
    assert!(!page.is_success());
}

#[tokio::test]
async fn test_probe_uses_head_requests() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/a/report.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine();
    let found = engine
        .probe(&format!("{}/a/report.pdf", server.uri()))
        .await
        .unwrap();
    let missing = engine
        .probe(&format!("{}/a/archive.zip", server.uri()))
        .await
        .unwrap();

    assert_eq!(found, 200);
    assert_eq!(missing, 404);
}

#[tokio::test]
async fn test_probe_transport_error() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = engine().probe(&format!("http://{}/a/report.pdf", addr)).await;

    assert!(matches!(result, Err(EngineError::RequestFailed(_))));
}

#[tokio::test]
async fn test_open_stream_yields_full_body() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/a/archive.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let mut stream = engine()
        .open_stream(&format!("{}/a/archive.zip", server.uri()))
        .await
        .unwrap();
    let mut received = Vec::new();
    while let Some(chunk) = stream.next().await {
        received.extend_from_slice(&chunk.unwrap());
    }

    assert_eq!(received, body);
}

#[tokio::test]
async fn test_open_stream_rejects_error_status() {
    let server = MockServer::start().await;

    let result = engine()
        .open_stream(&format!("{}/a/archive.zip", server.uri()))
        .await;

    match result {
        Err(EngineError::UnexpectedStatus { status, .. }) => assert_eq!(status, 404),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected an error for a missing file"),
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use mirrorcheck::application::use_cases::verify_migration_use_case::VerifyMigrationUseCase;
use mirrorcheck::config::settings::{CrawlSettings, HttpSettings, MetricsSettings, Settings, VerifySettings};
use mirrorcheck::engines::reqwest_engine::ReqwestEngine;
use mirrorcheck::utils::errors::VerifyError;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPORT_PDF: &[u8] = b"%PDF-1.4\nquarterly report\n%%EOF";
const ARCHIVE_ZIP: &[u8] = b"PK\x03\x04archive contents";

fn authority(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

fn settings(source: &MockServer, target: &MockServer, deep_check: &[&str]) -> Settings {
    Settings {
        crawl: CrawlSettings {
            starting_url: format!("{}/a/", source.uri()),
            allowed_hosts: vec![authority(source)],
            max_concurrency: 4,
        },
        verify: VerifySettings {
            target_host: authority(target),
            tracked_extensions: ["pdf", "deb", "exe", "zip", "pex", "torrent", "img"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            deep_check_extensions: deep_check.iter().map(|s| s.to_string()).collect(),
            probe_concurrency: 16,
        },
        http: HttpSettings {
            user_agent: "mirrorcheck-e2e/0.1".to_string(),
            request_timeout_secs: 10,
        },
        metrics: MetricsSettings {
            render_on_exit: false,
        },
    }
}

async fn mount_listing(server: &MockServer, listing_path: &str, anchors: &[&str]) {
    let body: String = anchors
        .iter()
        .map(|a| format!("<a href=\"{}\">{}</a>\n", a, a))
        .collect();
    Mock::given(method("GET"))
        .and(path(listing_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(format!("<html><body><pre>{}</pre></body></html>", body), "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_file(server: &MockServer, file_path: &str, content: &[u8]) {
    Mock::given(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// 源站：/a/report.pdf 与 /a/sub/archive.zip
async fn source_site() -> MockServer {
    let source = MockServer::start().await;
    mount_listing(&source, "/a/", &["../", "report.pdf", "sub/"]).await;
    mount_listing(&source, "/a/sub/", &["../", "archive.zip"]).await;
    mount_file(&source, "/a/report.pdf", REPORT_PDF).await;
    mount_file(&source, "/a/sub/archive.zip", ARCHIVE_ZIP).await;
    source
}

fn use_case(settings: &Settings) -> VerifyMigrationUseCase {
    let engine = Arc::new(ReqwestEngine::from_settings(&settings.http).unwrap());
    VerifyMigrationUseCase::from_settings(settings, engine).unwrap()
}

#[tokio::test]
async fn test_partial_migration_is_detected() {
    let source = source_site().await;
    let target = MockServer::start().await;
    mount_file(&target, "/a/report.pdf", REPORT_PDF).await;

    let settings = settings(&source, &target, &["pdf", "zip"]);
    let report = use_case(&settings).execute().await.unwrap();

    assert_eq!(report.file_links.len(), 2);
    assert_eq!(report.existence.not_found_count(), 1);
    let (missing, _) = report.existence.not_found().next().unwrap();
    assert_eq!(missing.file_name(), "archive.zip");

    let deep: Vec<(&str, bool)> = report
        .deep_check
        .iter()
        .map(|(link, matched)| (link.file_name(), *matched))
        .collect();
    assert_eq!(deep, vec![("report.pdf", true), ("archive.zip", false)]);
    assert_eq!(
        report.mismatches().map(|l| l.file_name()).collect::<Vec<_>>(),
        vec!["archive.zip"]
    );
}

#[tokio::test]
async fn test_single_byte_difference_is_a_mismatch() {
    let source = source_site().await;
    let target = MockServer::start().await;
    let mut corrupted = ARCHIVE_ZIP.to_vec();
    let last = corrupted.len() - 1;
    corrupted[last] ^= 0x01;
    mount_file(&target, "/a/report.pdf", REPORT_PDF).await;
    mount_file(&target, "/a/sub/archive.zip", &corrupted).await;

    let settings = settings(&source, &target, &["pdf", "zip"]);
    let report = use_case(&settings).execute().await.unwrap();

    assert_eq!(report.existence.not_found_count(), 0);
    let deep: Vec<bool> = report.deep_check.values().copied().collect();
    assert_eq!(deep, vec![true, false]);
}

#[tokio::test]
async fn test_deep_check_only_covers_configured_extensions() {
    let source = source_site().await;
    let target = MockServer::start().await;
    mount_file(&target, "/a/report.pdf", REPORT_PDF).await;
    mount_file(&target, "/a/sub/archive.zip", ARCHIVE_ZIP).await;

    let settings = settings(&source, &target, &["pdf"]);
    let report = use_case(&settings).execute().await.unwrap();

    assert_eq!(report.deep_check.len(), 1);
    assert_eq!(report.mismatches().count(), 0);
}

#[tokio::test]
async fn test_failed_listing_page_aborts_the_run() {
    let source = MockServer::start().await;
    mount_listing(&source, "/a/", &["report.pdf", "broken/"]).await;
    Mock::given(method("GET"))
        .and(path("/a/broken/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&source)
        .await;
    let target = MockServer::start().await;

    let settings = settings(&source, &target, &["pdf"]);
    let result = use_case(&settings).execute().await;

    match result {
        Err(VerifyError::PageStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected a fatal crawl error, got {:?}", other.map(|r| r.file_links)),
    }
}

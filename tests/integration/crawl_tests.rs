//! Integration tests for the crawl session
//!
//! These tests use wiremock to serve pages to the real HTTP fetcher and
//! check what ends up in the storage directory.

use std::fs;
use sumi_scribe::config::{Config, FetchConfig, StorageConfig};
use sumi_scribe::crawler::{CrawlSession, FetchCause, FetchFailure};
use sumi_scribe::output::aggregate;
use sumi_scribe::storage::{compact, extract_url, VisitedStore};
use sumi_scribe::url::RootScope;
use sumi_scribe::ScribeError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at the given storage directory
fn create_test_config(dir: &TempDir) -> Config {
    Config {
        storage: StorageConfig::default().with_directory(dir.path()),
        fetch: FetchConfig {
            timeout_secs: 5,
            user_agent: "TestScribe/1.0".to_string(),
        },
        ..Config::default()
    }
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_records_new_in_scope_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <p>Welcome home</p>
            <a href="/page1">Page 1</a>
            <a href="page2">Page 2</a>
            <a href="/page1">Page 1 again</a>
            <a href="https://other.com/x">Elsewhere</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let root = format!("{}/", base_url);
    let mut session = CrawlSession::open(&config, RootScope::new(root.clone())).unwrap();

    let report = session.run(&root).await.unwrap();
    assert_eq!(report.in_scope_links, 3);
    assert_eq!(report.recorded(), 2);
    assert!(session.store().is_member(&format!("{}/page1", base_url)));
    assert!(session.store().is_member(&format!("{}/page2", base_url)));
    assert!(!session.store().is_member("https://other.com/x"));

    let visited = fs::read_to_string(config.storage.url_list_path()).unwrap();
    assert_eq!(
        visited,
        format!("Page 1: {0}/page1\nPage 2: {0}/page2\n", base_url)
    );

    let content = fs::read_to_string(config.storage.content_path()).unwrap();
    assert!(content.starts_with(&format!("URL: {}\n\nObsah:\nHome Welcome home", root)));

    // Crawling the same page again discovers nothing new
    let again = session.run(&root).await.unwrap();
    assert_eq!(again.recorded(), 0);
    let visited_after = fs::read_to_string(config.storage.url_list_path()).unwrap();
    assert_eq!(visited, visited_after);
}

#[tokio::test]
async fn test_restart_reuses_visited_set() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/a",
        format!(r#"<html><body><a href="{}/shared">Shared</a></body></html>"#, base_url),
    )
    .await;
    mount_page(
        &mock_server,
        "/b",
        r#"<html><body><a href="/shared">Shared</a><a href="/fresh">Fresh</a></body></html>"#
            .to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);

    {
        let mut session = CrawlSession::open(&config, RootScope::unfiltered()).unwrap();
        let report = session.run(&format!("{}/a", base_url)).await.unwrap();
        assert_eq!(report.recorded(), 1);
    }

    let mut session = CrawlSession::open(&config, RootScope::unfiltered()).unwrap();
    assert_eq!(session.store().len(), 1);

    let report = session.run(&format!("{}/b", base_url)).await.unwrap();
    assert_eq!(report.recorded(), 1);
    assert_eq!(report.new_links[0].url, format!("{}/fresh", base_url));
}

#[tokio::test]
async fn test_http_error_persists_nothing() {
    let mock_server = MockServer::start().await;
    let missing = format!("{}/missing", mock_server.uri());

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut session = CrawlSession::open(&config, RootScope::unfiltered()).unwrap();

    let err = session.run(&missing).await.unwrap_err();
    assert!(err.is_recoverable());
    match err {
        ScribeError::Fetch(FetchFailure { url, cause }) => {
            assert_eq!(url, missing);
            assert_eq!(cause, FetchCause::Status(404));
        }
        other => panic!("unexpected error: {}", other),
    }

    assert!(!config.storage.content_path().exists());
    assert!(!config.storage.links_path().exists());
    assert!(!config.storage.url_list_path().exists());
}

#[tokio::test]
async fn test_compaction_after_legacy_duplicates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/one">One</a><a href="/two">Two</a></body></html>"#.to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut session = CrawlSession::open(&config, RootScope::unfiltered()).unwrap();
    session.run(&format!("{}/", base_url)).await.unwrap();

    // An older tool appended the same URLs in other shapes
    let store_path = config.storage.url_list_path();
    let mut content = fs::read_to_string(&store_path).unwrap();
    content.push_str(&format!("{0}/one\nURL: {0}/two\n\nOdkazy:\n", base_url));
    fs::write(&store_path, content).unwrap();

    assert_eq!(session.compact().unwrap(), 2);
    assert_eq!(compact(&store_path).unwrap(), 0);

    let lines: Vec<String> = fs::read_to_string(&store_path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            format!("One: {}/one", base_url),
            format!("Two: {}/two", base_url),
            String::new(),
            "Odkazy:".to_string(),
        ]
    );
    assert!(lines[..2].iter().all(|line| extract_url(line).is_some()));
}

#[tokio::test]
async fn test_statistics_use_their_own_extraction_rule() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>See https://docs.example.org/guide for more.
            <a href="/local">Local</a></body></html>"#
            .to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let root = format!("{}/", base_url);
    let mut session = CrawlSession::open(&config, RootScope::new(root.clone())).unwrap();
    session.run(&root).await.unwrap();
    assert_eq!(session.store().len(), 1);

    // The pattern stops at the port colon, so every local URL collapses to
    // "http://127.0.0.1" and none of them matches the root prefix.
    let stats = aggregate(&config.storage.directory, &RootScope::new(root)).unwrap();
    assert_eq!(stats.files_scanned, 3);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.domain, 0);
    assert_eq!(stats.other, 2);
}

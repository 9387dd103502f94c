//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use press_mirror::config::Config;
use press_mirror::crawler::{run_crawl, Coordinator, HttpFetcher};
use press_mirror::pagination::ListingEndpoint;
use press_mirror::storage::{DocumentStore, FsDocumentStore, TargetIdentity};
use press_mirror::{MirrorError, StopReason};
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const LIST_PATH: &str = "/ch/app/news_list";
const VIEW_PATH: &str = "/ch/app/news_list/view";

/// Listing entry: (serno, date, unit, title)
type Entry<'a> = (u32, &'a str, &'a str, &'a str);

fn listing_html(entries: &[Entry<'_>]) -> String {
    let items: String = entries
        .iter()
        .map(|(serno, date, unit, title)| {
            format!(
                r#"<li><a href="/ch/app/news_list/view?module=news&id=14&serno={serno}">發布日期：{date} 發布單位：{unit} {title}</a></li>"#
            )
        })
        .collect();
    format!("<html><body><ul>{items}</ul></body></html>")
}

fn article_html(date: &str, unit: &str, title: &str, body: &[&str]) -> String {
    let paragraphs: String = body.iter().map(|line| format!("<p>{line}</p>\n")).collect();
    format!(
        "<html><body>\n<div>交通新聞稿</div>\n<div>新聞類別：一般新聞</div>\n\
         <div>發布日期：{date}</div>\n<div>發布單位：{unit}</div>\n<h2>{title}</h2>\n\
         {paragraphs}<div>回上一頁</div>\n</body></html>"
    )
}

/// Mounts the article detail page for one entry
async fn mount_article(server: &MockServer, entry: Entry<'_>, body: &[&str]) {
    let (serno, date, unit, title) = entry;
    Mock::given(method("GET"))
        .and(path(VIEW_PATH))
        .and(query_param("serno", serno.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(date, unit, title, body)))
        .mount(server)
        .await;
}

/// Mounts a listing page selected by one query parameter
async fn mount_listing_page(server: &MockServer, key: &str, value: &str, entries: &[Entry<'_>]) {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param(key, value))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(entries)))
        .mount(server)
        .await;
}

/// Mounts page 0: the listing URL without any pagination parameter
async fn mount_listing_first(server: &MockServer, entries: &[Entry<'_>]) {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(|request: &Request| request.url.query() == Some("id=14"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(entries)))
        .mount(server)
        .await;
}

/// Mounts the catch-all listing response; must be mounted after specific pages
async fn mount_listing_default(server: &MockServer, entries: &[Entry<'_>]) {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(entries)))
        .mount(server)
        .await;
}

fn test_config(server: &MockServer, out_dir: &Path, max_pages: u32) -> Config {
    let mut config = Config::default();
    config.crawler.list_url = format!("{}{}?id=14", server.uri(), LIST_PATH);
    config.crawler.base_url = server.uri();
    config.crawler.request_delay_ms = 0;
    config.crawler.max_pages = max_pages;
    config.fetch.max_attempts = 1;
    config.fetch.retry_delay_ms = 0;
    config.fetch.timeout_secs = 5;
    config.output.output_dir = out_dir.to_string_lossy().into_owned();
    config
}

async fn listing_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == LIST_PATH)
        .count()
}

const A: Entry<'static> = (1, "113-05-01", "U1", "T1");
const B: Entry<'static> = (2, "113-04-30", "U2", "T2");
const C: Entry<'static> = (3, "113-04-29", "U3", "T3");
const D: Entry<'static> = (4, "113-04-28", "U4", "T4");
const E: Entry<'static> = (5, "113-04-27", "U5", "T5");

#[tokio::test]
async fn test_mirrors_every_item_of_single_page() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_listing_default(&server, &[A, B]).await;
    mount_article(&server, A, &["第一段", "第二段"]).await;
    mount_article(&server, B, &["內容"]).await;

    let config = test_config(&server, out.path(), 1);
    let outcome = run_crawl(&config).await.expect("crawl should succeed");

    assert_eq!(outcome.stop, StopReason::Exhausted);
    assert_eq!(outcome.stats.pages_visited, 1);
    assert_eq!(outcome.stats.documents_saved, 2);
    assert_eq!(outcome.stats.items_failed, 0);

    let first = std::fs::read_to_string(out.path().join("U1_113-05-01_T1.md")).unwrap();
    assert!(first.starts_with("# T1\n\n"));
    assert!(first.contains("- 發布日期：113-05-01\n"));
    assert!(first.contains("- 發布單位：U1\n"));
    assert!(first.contains("- 新聞類別：一般新聞\n"));
    assert!(first.contains("\n---\n\n第一段\n第二段\n"));
    assert!(!first.contains("回上一頁"));

    assert!(out.path().join("U2_113-04-30_T2.md").exists());
    // max_pages = 1 never probes for pagination
    assert_eq!(listing_requests(&server).await, 1);
}

#[tokio::test]
async fn test_listing_without_second_page_completes() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // page=2 and every other probe come back empty
    mount_listing_first(&server, &[A, B]).await;
    mount_listing_default(&server, &[]).await;
    mount_article(&server, A, &["內容"]).await;
    mount_article(&server, B, &["內容"]).await;

    let config = test_config(&server, out.path(), 0);
    let outcome = run_crawl(&config).await.expect("crawl should succeed");

    assert_eq!(outcome.stop, StopReason::Exhausted);
    assert_eq!(outcome.stats.pages_visited, 1);
    assert_eq!(outcome.stats.documents_saved, 2);
    assert!(out.path().join("U1_113-05-01_T1.md").exists());
    assert!(out.path().join("U2_113-04-30_T2.md").exists());

    // page 0 plus the 14 probes, no further listing pages
    assert_eq!(listing_requests(&server).await, 15);
}

#[tokio::test]
async fn test_halts_at_already_mirrored_item() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    let existing = out.path().join("U2_113-04-30_T2.md");
    std::fs::write(&existing, "previous run").unwrap();

    mount_listing_default(&server, &[A, B, C]).await;
    mount_article(&server, A, &["內容"]).await;
    mount_article(&server, B, &["內容"]).await;
    mount_article(&server, C, &["內容"]).await;

    let config = test_config(&server, out.path(), 0);
    let outcome = run_crawl(&config).await.expect("crawl should succeed");

    match &outcome.stop {
        StopReason::AlreadyMirrored { identity, path } => {
            assert_eq!(identity.file_name(), "U2_113-04-30_T2.md");
            assert_eq!(path, &existing);
        }
        other => panic!("unexpected stop reason: {:?}", other),
    }
    assert_eq!(outcome.stats.documents_saved, 1);
    assert!(out.path().join("U1_113-05-01_T1.md").exists());
    assert!(!out.path().join("U3_113-04-29_T3.md").exists());

    // Existing document is left untouched
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "previous run");

    // Neither the mirrored item nor anything after it was fetched
    let article_requests: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == VIEW_PATH)
        .map(|request| request.url.query().unwrap_or_default().to_string())
        .collect();
    assert_eq!(article_requests.len(), 1);
    assert!(article_requests[0].contains("serno=1"));
}

#[tokio::test]
async fn test_discovery_failure_after_first_page() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    // Every probe serves page 0 again
    mount_listing_default(&server, &[A, B]).await;
    mount_article(&server, A, &["內容"]).await;
    mount_article(&server, B, &["內容"]).await;

    let config = test_config(&server, out.path(), 0);
    let result = run_crawl(&config).await;

    assert!(matches!(result, Err(MirrorError::Discovery(_))));

    // Page 0 plus six page-index and eight offset probes
    assert_eq!(listing_requests(&server).await, 15);

    // Page 0 was fully mirrored before discovery ran
    assert!(out.path().join("U1_113-05-01_T1.md").exists());
    assert!(out.path().join("U2_113-04-30_T2.md").exists());
}

#[tokio::test]
async fn test_follows_discovered_pagination() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_listing_page(&server, "page", "1", &[C, D]).await;
    mount_listing_page(&server, "page", "2", &[E]).await;
    mount_listing_page(&server, "page", "3", &[]).await;
    mount_listing_default(&server, &[A, B]).await;
    for entry in [A, B, C, D, E] {
        mount_article(&server, entry, &["內容"]).await;
    }

    let config = test_config(&server, out.path(), 0);
    let outcome = run_crawl(&config).await.expect("crawl should succeed");

    assert_eq!(outcome.stop, StopReason::Exhausted);
    assert_eq!(outcome.stats.pages_visited, 3);
    assert_eq!(outcome.stats.documents_saved, 5);
    for name in [
        "U1_113-05-01_T1.md",
        "U2_113-04-30_T2.md",
        "U3_113-04-29_T3.md",
        "U4_113-04-28_T4.md",
        "U5_113-04-27_T5.md",
    ] {
        assert!(out.path().join(name).exists(), "missing {}", name);
    }
}

#[tokio::test]
async fn test_failed_article_is_skipped() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_listing_default(&server, &[A, B]).await;
    Mock::given(method("GET"))
        .and(path(VIEW_PATH))
        .and(query_param("serno", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_article(&server, B, &["內容"]).await;

    let config = test_config(&server, out.path(), 1);
    let outcome = run_crawl(&config).await.expect("crawl should succeed");

    assert_eq!(outcome.stop, StopReason::Exhausted);
    assert_eq!(outcome.stats.items_failed, 1);
    assert_eq!(outcome.stats.documents_saved, 1);
    assert!(!out.path().join("U1_113-05-01_T1.md").exists());
    assert!(out.path().join("U2_113-04-30_T2.md").exists());
}

#[tokio::test]
async fn test_first_page_failure_is_fatal() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = test_config(&server, out.path(), 0);
    let result = run_crawl(&config).await;

    assert!(matches!(result, Err(MirrorError::Fetch(_))));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_coordinator_over_public_parts() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_listing_default(&server, &[A]).await;
    mount_article(&server, A, &["內容"]).await;

    let config = test_config(&server, out.path(), 1);
    let endpoint = ListingEndpoint::new(
        Url::parse(&config.crawler.list_url).unwrap(),
        Url::parse(&config.crawler.base_url).unwrap(),
    );
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.fetch).unwrap();
    let store = FsDocumentStore::open(out.path()).unwrap();

    let mut coordinator = Coordinator::new(fetcher, store, endpoint, Some(1));
    let outcome = coordinator.run().await.unwrap();

    assert_eq!(outcome.stats.documents_saved, 1);
    let identity = TargetIdentity::new("U1", "113-05-01", "T1");
    assert!(coordinator.store().exists(&identity));

    // A second run stops at once
    let second = coordinator.run().await.unwrap();
    assert!(matches!(second.stop, StopReason::AlreadyMirrored { .. }));
    assert_eq!(second.stats.documents_saved, 0);
}

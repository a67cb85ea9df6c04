//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use trailhead::config::{normalize, parse_json_input, process_input, CrawlOptions, RawInput};
use trailhead::crawler::{crawl, Coordinator, CrawlReport};
use trailhead::{ConfigError, CrawlError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates normalized options for a crawl rooted at `start`
fn create_test_options(start: &str, configure: impl FnOnce(&mut RawInput)) -> CrawlOptions {
    let mut raw = RawInput {
        query: Some(start.to_string()),
        enable_recursive_crawling: Some(true),
        ..Default::default()
    };
    configure(&mut raw);
    normalize(&raw).expect("Failed to normalize options")
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    "<html><head><title>{}</title></head><body>{}</body></html>",
                    title, body
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn crawled_paths(report: &CrawlReport) -> Vec<String> {
    let mut paths: Vec<String> = report
        .pages
        .iter()
        .map(|p| url::Url::parse(&p.url).expect("Invalid URL").path().to_string())
        .collect();
    paths.sort();
    paths
}

async fn run(options: CrawlOptions, start: &str) -> CrawlReport {
    let start = url::Url::parse(start).expect("Failed to parse start URL");
    Coordinator::new(options, start)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed")
}

#[tokio::test]
async fn test_full_crawl_respects_max_depth() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/page1">Page 1</a><a href="/page2">Page 2</a>"#,
    )
    .await;
    mount_page(&mock_server, "/page1", "Page 1", r#"<a href="/page3">Page 3</a>"#).await;
    mount_page(&mock_server, "/page2", "Page 2", "Content 2").await;
    mount_page(&mock_server, "/page3", "Page 3", r#"<a href="/page4">Page 4</a>"#).await;

    // Depth 3 is beyond the default max depth of 2
    Mock::given(method("GET"))
        .and(path("/page4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = run(create_test_options(&start, |_| {}), &start).await;

    assert_eq!(crawled_paths(&report), vec!["/", "/page1", "/page2", "/page3"]);
    assert_eq!(report.failed().count(), 0);

    let home = &report.pages[0];
    assert_eq!(home.depth, 0);
    assert_eq!(home.title.as_deref(), Some("Home"));
    assert_eq!(home.links_enqueued, 2);

    let page3 = report
        .pages
        .iter()
        .find(|p| p.url.ends_with("/page3"))
        .expect("page3 not crawled");
    assert_eq!(page3.depth, 2);
    assert_eq!(page3.links_enqueued, 0);
}

#[tokio::test]
async fn test_recursion_disabled_fetches_only_start_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "Home", r#"<a href="/page1">Page 1</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let options = create_test_options(&start, |raw| raw.enable_recursive_crawling = Some(false));
    let report = run(options, &start).await;

    assert_eq!(crawled_paths(&report), vec!["/"]);
}

#[tokio::test]
async fn test_include_and_exclude_patterns() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/docs",
        "Docs",
        r#"
        <a href="/docs/intro">Intro</a>
        <a href="/blog/post">Blog</a>
        <a href="/docs/archive/old">Archive</a>
        "#,
    )
    .await;
    mount_page(&mock_server, "/docs/intro", "Intro", "").await;

    for route in ["/blog/post", "/docs/archive/old"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let start = format!("{}/docs", base_url);
    let options = parse_json_input(&format!(
        r#"{{
            "query": "{}",
            "enableRecursiveCrawling": true,
            "includePatterns": ["/docs/**"],
            "excludePatterns": "/docs/archive/**"
        }}"#,
        start
    ))
    .and_then(|raw| normalize(&raw))
    .expect("Failed to build options");

    let report = run(options, &start).await;
    assert_eq!(crawled_paths(&report), vec!["/docs", "/docs/intro"]);
}

#[tokio::test]
async fn test_domain_budget_limits_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a><a href="/d">D</a>"#,
    )
    .await;
    for route in ["/a", "/b", "/c", "/d"] {
        mount_page(&mock_server, route, route, "").await;
    }

    let start = format!("{}/", base_url);
    let options = create_test_options(&start, |raw| raw.max_pages_per_domain = Some(3u32.into()));
    let report = run(options, &start).await;

    // The start page counts toward the budget
    assert_eq!(crawled_paths(&report), vec!["/", "/a", "/b"]);
    assert_eq!(report.visited, 3);
}

#[tokio::test]
async fn test_shared_links_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/a#again">A again</a>"#,
    )
    .await;
    mount_page(&mock_server, "/a", "A", r#"<a href="/shared">Shared</a>"#).await;
    mount_page(&mock_server, "/b", "B", r#"<a href="/shared">Shared</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Shared</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = run(create_test_options(&start, |_| {}), &start).await;

    assert_eq!(crawled_paths(&report), vec!["/", "/a", "/b", "/shared"]);
}

#[tokio::test]
async fn test_failed_pages_do_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/broken">Broken</a><a href="/missing">Missing</a><a href="/ok">OK</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "OK", "").await;

    let start = format!("{}/", base_url);
    let report = run(create_test_options(&start, |_| {}), &start).await;

    assert_eq!(report.pages.len(), 4);
    assert_eq!(report.succeeded().count(), 2);

    let mut failed: Vec<_> = report.failed().filter_map(|p| p.status_code).collect();
    failed.sort();
    assert_eq!(failed, vec![404, 500]);
}

#[tokio::test]
async fn test_external_links_not_followed_by_default() {
    let mock_server = MockServer::start().await;
    let port = url::Url::parse(&mock_server.uri())
        .expect("Failed to parse base URL")
        .port()
        .expect("Mock server has no port");

    // Same server reached through a different host name counts as external
    mount_page(
        &mock_server,
        "/",
        "Home",
        &format!(r#"<a href="http://localhost:{}/external">External</a>"#, port),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/external"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start = format!("http://127.0.0.1:{}/", port);
    let report = run(create_test_options(&start, |_| {}), &start).await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].links_enqueued, 0);
}

#[tokio::test]
async fn test_non_html_pages_not_parsed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"href": "<a href=\"/page1\">x</a>"}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = run(create_test_options(&start, |_| {}), &start).await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].title, None);
    assert_eq!(report.pages[0].links_enqueued, 0);
}

#[tokio::test]
async fn test_documentation_mode_crawls_deeper() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "Home", r#"<a href="/1">1</a>"#).await;
    mount_page(&mock_server, "/1", "1", r#"<a href="/2">2</a>"#).await;
    mount_page(&mock_server, "/2", "2", r#"<a href="/3">3</a>"#).await;
    mount_page(&mock_server, "/3", "3", r#"<a href="/4">4</a>"#).await;

    let start = format!("{}/", base_url);
    let raw = RawInput {
        query: Some(start.clone()),
        documentation_mode: Some(true),
        ..Default::default()
    };
    let processed = process_input(&raw).expect("Failed to process input");
    let report = run(processed.options, &start).await;

    assert_eq!(crawled_paths(&report), vec!["/", "/1", "/2", "/3"]);
}

#[tokio::test]
async fn test_crawl_rejects_search_query() {
    let options = create_test_options("how to build a crawler", |_| {});
    let result = crawl(options).await;

    assert!(matches!(
        result,
        Err(CrawlError::Config(ConfigError::UserInput(_)))
    ));
}

#[tokio::test]
async fn test_redirect_target_does_not_consume_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/home"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/home", "Home", r#"<a href="/a">A</a>"#).await;
    mount_page(&mock_server, "/a", "A", "").await;

    let start = format!("{}/", base_url);
    let options = create_test_options(&start, |raw| raw.max_pages_per_domain = Some(2u32.into()));
    let report = run(options, &start).await;

    assert_eq!(crawled_paths(&report), vec!["/", "/a"]);
    assert_eq!(report.pages[0].links_enqueued, 1);
}

#[tokio::test]
async fn test_start_url_fragment_not_refetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><a href="/">Home</a><a href="/a">A</a></body></html>"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/a", "A", r#"<a href="/">Back</a>"#).await;

    let report = crawl(create_test_options(&format!("{}/#top", base_url), |_| {}))
        .await
        .expect("Crawl failed");

    assert_eq!(crawled_paths(&report), vec!["/", "/a"]);
}

//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the crawl-wide [`VisitedSet`] and the frontier. It is the
//! only place that commits URLs:
//! - pages beyond `maxDepth` never reach discovery
//! - each accepted link is committed with an atomic insert-if-absent before it is
//!   enqueued, so a URL found on several pages of one batch is fetched once
//! - internal links are committed against the live domain budget

use crate::config::CrawlOptions;
use crate::crawler::discovery::{page_title, LinkDiscovery};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchedPage};
use crate::state::VisitedSet;
use crate::{ConfigError, CrawlError};
use reqwest::Client;
use scraper::Html;
use serde::Serialize;
use std::collections::VecDeque;
use tokio::task::JoinSet;
use url::Url;

/// A page waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedPage {
    pub url: Url,
    pub depth: u32,
}

/// Outcome of fetching one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawledPage {
    pub url: String,
    pub depth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Links from this page that were newly enqueued
    pub links_enqueued: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub start_url: String,
    pub pages: Vec<CrawledPage>,
    /// Number of distinct URLs committed to the visited set
    pub visited: usize,
}

impl CrawlReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &CrawledPage> {
        self.pages.iter().filter(|p| p.error.is_none())
    }

    pub fn failed(&self) -> impl Iterator<Item = &CrawledPage> {
        self.pages.iter().filter(|p| p.error.is_some())
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    options: CrawlOptions,
    discovery: LinkDiscovery,
    visited: VisitedSet,
    frontier: VecDeque<QueuedPage>,
    client: Client,
    start_url: Url,
}

impl Coordinator {
    /// Creates a coordinator rooted at `start_url`
    ///
    /// The start URL is committed to the visited set at depth 0 and becomes the
    /// crawl's base URL for internal/external classification.
    pub fn new(options: CrawlOptions, start_url: Url) -> Result<Self, CrawlError> {
        let client = build_http_client(options.request_timeout_secs)?;
        Ok(Self::with_client(options, start_url, client))
    }

    /// Creates a coordinator that fetches through an existing client
    pub fn with_client(options: CrawlOptions, start_url: Url, client: Client) -> Self {
        let discovery = LinkDiscovery::new(options.discovery_options(start_url.clone()));

        let visited = VisitedSet::new();
        visited.add(&start_url);

        let mut frontier = VecDeque::new();
        frontier.push_back(QueuedPage {
            url: start_url.clone(),
            depth: 0,
        });

        Self {
            options,
            discovery,
            visited,
            frontier,
            client,
            start_url,
        }
    }

    /// The crawl-wide visited set
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// Pages are fetched in batches of at most `desiredConcurrency`. Results are
    /// processed in frontier order, so output is deterministic for a given site.
    /// Fetch failures are recorded in the report and never stop the crawl.
    pub async fn run(mut self) -> Result<CrawlReport, CrawlError> {
        tracing::info!(
            "Starting crawl at {} (max depth {}, max {} pages per domain)",
            self.start_url,
            self.options.max_depth,
            self.options.max_pages_per_domain
        );

        let batch_size = self.options.desired_concurrency.max(1) as usize;
        let mut report = CrawlReport {
            start_url: self.start_url.to_string(),
            ..Default::default()
        };

        while !self.frontier.is_empty() {
            let take = batch_size.min(self.frontier.len());
            let batch: Vec<QueuedPage> = self.frontier.drain(..take).collect();

            let mut tasks = JoinSet::new();
            for (index, page) in batch.into_iter().enumerate() {
                let client = self.client.clone();
                tasks.spawn(async move {
                    let result = fetch_page(&client, &page.url).await;
                    (index, page, result)
                });
            }

            let mut results = Vec::with_capacity(take);
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(result) => results.push(result),
                    Err(e) => tracing::error!("Fetch task failed: {}", e),
                }
            }
            results.sort_by_key(|(index, _, _)| *index);

            for (_, page, result) in results {
                let crawled = match result {
                    Ok(fetched) => self.process_page(&page, fetched),
                    Err(e) => {
                        tracing::warn!("Failed to fetch {}: {}", page.url, e);
                        CrawledPage {
                            url: page.url.to_string(),
                            depth: page.depth,
                            status_code: match &e {
                                CrawlError::HttpStatus { status, .. } => Some(*status),
                                _ => None,
                            },
                            title: None,
                            links_enqueued: 0,
                            error: Some(e.to_string()),
                        }
                    }
                };
                report.pages.push(crawled);
            }

            tracing::info!(
                "Progress: {} pages crawled, {} in frontier, {} visited",
                report.pages.len(),
                self.frontier.len(),
                self.visited.len()
            );
        }

        report.visited = self.visited.len();
        tracing::info!(
            "Crawl complete: {} pages crawled, {} failed",
            report.pages.len(),
            report.failed().count()
        );

        Ok(report)
    }

    /// Parses a fetched page, discovers its links and commits them to the frontier
    fn process_page(&mut self, page: &QueuedPage, fetched: FetchedPage) -> CrawledPage {
        if fetched.final_url != page.url {
            tracing::debug!("{} redirected to {}", page.url, fetched.final_url);
            let mut target = fetched.final_url.clone();
            target.set_fragment(None);
            self.visited.add_uncounted(&target);
        }

        let mut crawled = CrawledPage {
            url: page.url.to_string(),
            depth: page.depth,
            status_code: Some(fetched.status_code),
            title: None,
            links_enqueued: 0,
            error: None,
        };

        if !fetched.is_html() {
            tracing::debug!(
                "Not parsing {}: content type '{}'",
                fetched.final_url,
                fetched.content_type
            );
            return crawled;
        }

        let document = Html::parse_document(&fetched.body);
        crawled.title = page_title(&document);

        if !self.options.enable_recursive_crawling || page.depth >= self.options.max_depth {
            return crawled;
        }

        let links =
            self.discovery
                .discover(&document, &fetched.final_url, &self.visited, page.depth);
        let budget = self.options.max_pages_per_domain as usize;

        for link in links {
            let Ok(url) = Url::parse(&link.url) else {
                continue;
            };

            let committed = if link.is_internal {
                self.visited.add_within_budget(&url, budget)
            } else {
                self.visited.add(&url)
            };

            if committed {
                self.frontier.push_back(QueuedPage {
                    url,
                    depth: link.depth,
                });
                crawled.links_enqueued += 1;
            }
        }

        crawled
    }
}

/// Crawls starting from the URL given as the query
///
/// Search queries that are not URLs are rejected: search lookups are not
/// performed by this crate.
pub async fn crawl(options: CrawlOptions) -> Result<CrawlReport, CrawlError> {
    let start_url = start_url(&options)?;
    Coordinator::new(options, start_url)?.run().await
}

/// Parses the query as the crawl's start URL
pub fn start_url(options: &CrawlOptions) -> Result<Url, ConfigError> {
    let query = options.query.as_deref().ok_or_else(|| {
        ConfigError::UserInput("The `query` parameter must be provided and non-empty.".to_string())
    })?;

    match Url::parse(query) {
        Ok(mut url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            url.set_fragment(None);
            Ok(url)
        }
        _ => Err(ConfigError::UserInput(format!(
            "The `query` parameter must be an absolute http(s) URL to start a crawl, got '{}'.",
            query
        ))),
    }
}

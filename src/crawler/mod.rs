//! Crawler module for link discovery and crawl orchestration
//!
//! This module contains:
//! - The link discovery engine that filters a page's anchors
//! - A thin HTTP fetcher
//! - The coordinator that drives discovery across a crawl

mod coordinator;
mod discovery;
mod fetcher;

pub use coordinator::{crawl, start_url, Coordinator, CrawlReport, CrawledPage, QueuedPage};
pub use discovery::{discover_links, page_title, DiscoveredLink, LinkDiscovery};
pub use fetcher::{build_http_client, fetch_page, FetchedPage, USER_AGENT};

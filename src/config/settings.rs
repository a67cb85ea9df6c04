//! Crawler settings derived from validated options
//!
//! One normalized [`CrawlOptions`] fans out into settings for the search crawler,
//! the content crawler(s) and the content scraper.

use crate::config::schema::MAX_HTML_CHARS_TO_PROCESS;
use crate::config::types::{CrawlOptions, OutputFormat, RawInput, ScrapingTool, SerpProxyGroup};
use crate::config::validation::{normalize, normalize_for_standby};
use crate::ConfigError;
use serde::Serialize;

/// Kind of content crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCrawlerKind {
    /// Headless browser crawler
    Playwright,
    /// Plain HTTP crawler with HTML parsing
    Http,
}

impl From<ScrapingTool> for ContentCrawlerKind {
    fn from(tool: ScrapingTool) -> Self {
        match tool {
            ScrapingTool::BrowserPlaywright => Self::Playwright,
            ScrapingTool::RawHttp => Self::Http,
        }
    }
}

/// Settings for the search-result crawler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCrawlerSettings {
    pub keep_alive: bool,
    pub max_request_retries: u32,
    pub proxy_group: SerpProxyGroup,
    pub desired_concurrency: u32,
}

/// Settings for one content crawler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCrawlerSettings {
    pub kind: ContentCrawlerKind,
    pub keep_alive: bool,
    pub max_request_retries: u32,
    pub request_handler_timeout_secs: u32,
    pub desired_concurrency: u32,
}

/// Settings for content extraction and recursive traversal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentScraperSettings {
    pub debug_mode: bool,
    pub dynamic_content_wait_secs: u32,
    pub html_transformer: String,
    pub max_html_chars_to_process: usize,
    pub output_formats: Vec<OutputFormat>,
    pub readable_text_char_threshold: u32,
    pub remove_cookie_warnings: bool,
    pub remove_elements_css_selector: String,
    pub documentation_mode: bool,
    pub enable_recursive_crawling: bool,
    pub max_depth: u32,
    pub max_pages_per_domain: u32,
    pub follow_internal_links: bool,
    pub include_patterns: String,
    pub exclude_patterns: String,
}

/// Everything a crawl run needs, derived from one input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedInput {
    pub options: CrawlOptions,
    pub search_crawler: SearchCrawlerSettings,
    pub content_crawlers: Vec<ContentCrawlerSettings>,
    pub content_scraper: ContentScraperSettings,
}

/// Processes input for a single run
///
/// The query is required and a single content crawler is configured, matching the
/// chosen scraping tool.
pub fn process_input(raw: &RawInput) -> Result<ProcessedInput, ConfigError> {
    let options = normalize(raw)?;
    let content_crawlers = vec![content_crawler(&options, options.scraping_tool.into(), false)];
    Ok(assemble(options, content_crawlers, false))
}

/// Processes input for standby mode
///
/// The query may be absent, and both content crawlers are configured up front with
/// keep-alive so either can serve later requests.
pub fn process_standby_input(raw: &RawInput) -> Result<ProcessedInput, ConfigError> {
    let options = normalize_for_standby(raw)?;
    let content_crawlers = vec![
        content_crawler(&options, ContentCrawlerKind::Playwright, true),
        content_crawler(&options, ContentCrawlerKind::Http, true),
    ];
    Ok(assemble(options, content_crawlers, true))
}

fn assemble(
    options: CrawlOptions,
    content_crawlers: Vec<ContentCrawlerSettings>,
    standby_init: bool,
) -> ProcessedInput {
    let search_crawler = SearchCrawlerSettings {
        keep_alive: standby_init,
        max_request_retries: options.serp_max_retries,
        proxy_group: options.serp_proxy_group,
        desired_concurrency: 1,
    };

    let content_scraper = ContentScraperSettings {
        debug_mode: options.debug_mode,
        dynamic_content_wait_secs: options.dynamic_content_wait_secs,
        html_transformer: options.html_transformer.clone(),
        max_html_chars_to_process: MAX_HTML_CHARS_TO_PROCESS,
        output_formats: options.output_formats.clone(),
        readable_text_char_threshold: options.readable_text_char_threshold,
        remove_cookie_warnings: options.remove_cookie_warnings,
        remove_elements_css_selector: options.remove_elements_css_selector.clone(),
        documentation_mode: options.documentation_mode,
        enable_recursive_crawling: options.enable_recursive_crawling,
        max_depth: options.max_depth,
        max_pages_per_domain: options.max_pages_per_domain,
        follow_internal_links: options.follow_internal_links,
        include_patterns: options.include_patterns.clone(),
        exclude_patterns: options.exclude_patterns.clone(),
    };

    ProcessedInput {
        options,
        search_crawler,
        content_crawlers,
        content_scraper,
    }
}

fn content_crawler(
    options: &CrawlOptions,
    kind: ContentCrawlerKind,
    keep_alive: bool,
) -> ContentCrawlerSettings {
    ContentCrawlerSettings {
        kind,
        keep_alive,
        max_request_retries: options.max_request_retries,
        request_handler_timeout_secs: options.request_timeout_secs,
        desired_concurrency: options.desired_concurrency,
    }
}

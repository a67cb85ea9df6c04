use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::url::split_patterns;

/// A numeric input that may arrive as a number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl From<u32> for NumberInput {
    fn from(value: u32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A pattern list that may arrive as an array or a comma-separated string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PatternInput {
    List(Vec<String>),
    Joined(String),
}

impl PatternInput {
    /// Collapses the input into one comma-joined string
    pub fn joined(&self) -> String {
        match self {
            Self::List(items) => items.join(","),
            Self::Joined(s) => s.clone(),
        }
    }
}

/// Crawl input exactly as supplied by the user
///
/// Every field is optional; [`crate::config::normalize`] fills defaults and bounds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    pub query: Option<String>,
    pub max_results: Option<NumberInput>,
    pub output_formats: Option<Vec<String>>,
    pub request_timeout_secs: Option<NumberInput>,
    pub serp_proxy_group: Option<String>,
    pub serp_max_retries: Option<NumberInput>,
    pub scraping_tool: Option<String>,
    pub remove_elements_css_selector: Option<String>,
    pub html_transformer: Option<String>,
    pub desired_concurrency: Option<NumberInput>,
    pub max_request_retries: Option<NumberInput>,
    pub dynamic_content_wait_secs: Option<NumberInput>,
    pub readable_text_char_threshold: Option<NumberInput>,
    pub remove_cookie_warnings: Option<bool>,
    pub debug_mode: Option<bool>,
    pub documentation_mode: Option<bool>,
    pub enable_recursive_crawling: Option<bool>,
    pub max_depth: Option<NumberInput>,
    pub max_pages_per_domain: Option<NumberInput>,
    pub follow_internal_links: Option<bool>,
    pub follow_external_links: Option<bool>,
    pub include_patterns: Option<PatternInput>,
    pub exclude_patterns: Option<PatternInput>,
}

/// Output format for scraped content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Markdown,
    Html,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "markdown" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            _ => Err(()),
        }
    }
}

/// Proxy group used for search result lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SerpProxyGroup {
    #[serde(rename = "GOOGLE_SERP")]
    GoogleSerp,
    #[serde(rename = "SHADER")]
    Shader,
}

impl FromStr for SerpProxyGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GOOGLE_SERP" => Ok(Self::GoogleSerp),
            "SHADER" => Ok(Self::Shader),
            _ => Err(()),
        }
    }
}

/// Tool used to fetch content pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrapingTool {
    BrowserPlaywright,
    RawHttp,
}

impl FromStr for ScrapingTool {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "browser-playwright" => Ok(Self::BrowserPlaywright),
            "raw-http" => Ok(Self::RawHttp),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ScrapingTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrowserPlaywright => f.write_str("browser-playwright"),
            Self::RawHttp => f.write_str("raw-http"),
        }
    }
}

/// Validated crawl configuration
///
/// Produced once per crawl by [`crate::config::normalize`]; every numeric field is
/// within its declared bounds and both pattern fields are comma-joined strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    /// Search query or start URL; absent only after standby initialization
    pub query: Option<String>,
    pub max_results: u32,
    pub output_formats: Vec<OutputFormat>,
    pub request_timeout_secs: u32,
    pub serp_proxy_group: SerpProxyGroup,
    pub serp_max_retries: u32,
    pub scraping_tool: ScrapingTool,
    pub remove_elements_css_selector: String,
    pub html_transformer: String,
    pub desired_concurrency: u32,
    pub max_request_retries: u32,
    pub dynamic_content_wait_secs: u32,
    pub readable_text_char_threshold: u32,
    pub remove_cookie_warnings: bool,
    pub debug_mode: bool,
    pub documentation_mode: bool,
    pub enable_recursive_crawling: bool,
    pub max_depth: u32,
    pub max_pages_per_domain: u32,
    pub follow_internal_links: bool,
    pub follow_external_links: bool,
    pub include_patterns: String,
    pub exclude_patterns: String,
}

impl CrawlOptions {
    /// Include globs as a trimmed list
    pub fn include_pattern_list(&self) -> Vec<&str> {
        split_patterns(&self.include_patterns).collect()
    }

    /// Exclude globs as a trimmed list
    pub fn exclude_pattern_list(&self) -> Vec<&str> {
        split_patterns(&self.exclude_patterns).collect()
    }

    /// Builds the traversal options for a crawl rooted at `base_url`
    pub fn discovery_options(&self, base_url: Url) -> LinkDiscoveryOptions {
        LinkDiscoveryOptions {
            base_url,
            max_depth: self.max_depth,
            max_pages_per_domain: self.max_pages_per_domain,
            follow_internal_links: self.follow_internal_links,
            follow_external_links: self.follow_external_links,
            include_patterns: self.include_patterns.clone(),
            exclude_patterns: self.exclude_patterns.clone(),
        }
    }
}

/// Traversal constraints consumed by the link discovery engine
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDiscoveryOptions {
    /// Root of the crawl; decides which links are internal
    pub base_url: Url,
    pub max_depth: u32,
    pub max_pages_per_domain: u32,
    pub follow_internal_links: bool,
    pub follow_external_links: bool,
    pub include_patterns: String,
    pub exclude_patterns: String,
}

impl LinkDiscoveryOptions {
    /// Options with the declared defaults for a crawl rooted at `base_url`
    pub fn new(base_url: Url) -> Self {
        use crate::config::schema;

        Self {
            base_url,
            max_depth: schema::MAX_DEPTH.default,
            max_pages_per_domain: schema::MAX_PAGES_PER_DOMAIN.default,
            follow_internal_links: schema::DEFAULT_FOLLOW_INTERNAL_LINKS,
            follow_external_links: schema::DEFAULT_FOLLOW_EXTERNAL_LINKS,
            include_patterns: schema::DEFAULT_INCLUDE_PATTERNS.to_string(),
            exclude_patterns: schema::DEFAULT_EXCLUDE_PATTERNS.to_string(),
        }
    }
}

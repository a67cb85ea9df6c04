//! Trailhead: a configurable recursive web-content crawler
//!
//! This crate implements the link-discovery and traversal-control engine of a
//! recursive crawler: glob-style include/exclude matching over URL paths, URL
//! resolution and internal/external classification, a crawl-wide visited set with
//! per-domain budgets, and the input normalizer that produces the immutable crawl
//! options consumed by the engine.

pub mod config;
pub mod crawler;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Trailhead operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required or enumerated input field is missing or holds an unsupported value
    #[error("Invalid input: {0}")]
    UserInput(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{href}': {message}")]
    Parse { href: String, message: String },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Glob pattern compilation errors
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Compile {
        pattern: String,
        source: regex::Error,
    },
}

/// Result type alias for Trailhead operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{normalize, CrawlOptions, LinkDiscoveryOptions, RawInput};
pub use crawler::{discover_links, DiscoveredLink, LinkDiscovery};
pub use state::VisitedSet;
pub use url::{resolve, PatternSet, ResolvedUrl};

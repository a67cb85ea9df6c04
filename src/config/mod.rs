//! Configuration module for Trailhead
//!
//! This module loads crawl input, validates it against the declared bounds and
//! defaults, and derives the settings each crawler component consumes.
//!
//! # Example
//!
//! ```no_run
//! use trailhead::config::{load_input, normalize};
//! use std::path::Path;
//!
//! let raw = load_input(Path::new("input.json")).unwrap();
//! let options = normalize(&raw).unwrap();
//! println!("Crawler will use max depth: {}", options.max_depth);
//! ```

mod parser;
pub mod schema;
mod settings;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlOptions, LinkDiscoveryOptions, NumberInput, OutputFormat, PatternInput, RawInput,
    ScrapingTool, SerpProxyGroup,
};

pub use parser::{load_input, parse_json_input, parse_toml_input};
pub use settings::{
    process_input, process_standby_input, ContentCrawlerKind, ContentCrawlerSettings,
    ContentScraperSettings, ProcessedInput, SearchCrawlerSettings,
};
pub use validation::{normalize, normalize_for_standby};

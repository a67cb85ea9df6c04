//! Declared bounds and defaults for every input field
//!
//! The `[min, max, default]` triples are part of the crawler's external contract.

/// Range and default for a numeric input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBounds {
    /// Input key as written by the user (camelCase)
    pub field: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

pub const MAX_RESULTS: NumericBounds = NumericBounds {
    field: "maxResults",
    min: 1,
    max: 100,
    default: 3,
};

pub const REQUEST_TIMEOUT_SECS: NumericBounds = NumericBounds {
    field: "requestTimeoutSecs",
    min: 1,
    max: 300,
    default: 40,
};

pub const SERP_MAX_RETRIES: NumericBounds = NumericBounds {
    field: "serpMaxRetries",
    min: 0,
    max: 5,
    default: 2,
};

pub const DESIRED_CONCURRENCY: NumericBounds = NumericBounds {
    field: "desiredConcurrency",
    min: 1,
    max: 50,
    default: 5,
};

pub const MAX_REQUEST_RETRIES: NumericBounds = NumericBounds {
    field: "maxRequestRetries",
    min: 0,
    max: 3,
    default: 1,
};

pub const READABLE_TEXT_CHAR_THRESHOLD: NumericBounds = NumericBounds {
    field: "readableTextCharThreshold",
    min: 0,
    max: 1_000_000,
    default: 100,
};

pub const MAX_DEPTH: NumericBounds = NumericBounds {
    field: "maxDepth",
    min: 0,
    max: 10,
    default: 2,
};

pub const MAX_PAGES_PER_DOMAIN: NumericBounds = NumericBounds {
    field: "maxPagesPerDomain",
    min: 1,
    max: 1000,
    default: 20,
};

pub const DEFAULT_REMOVE_ELEMENTS_CSS_SELECTOR: &str = "nav, footer, script, style, noscript, svg, \
     img[src^='data:'], [role=\"alert\"], [role=\"banner\"], [role=\"dialog\"], \
     [role=\"alertdialog\"], [role=\"region\"][aria-label*=\"skip\" i], [aria-modal=\"true\"]";

pub const DEFAULT_HTML_TRANSFORMER: &str = "none";
pub const DEFAULT_REMOVE_COOKIE_WARNINGS: bool = true;
pub const DEFAULT_DEBUG_MODE: bool = false;
pub const DEFAULT_DOCUMENTATION_MODE: bool = false;
pub const DEFAULT_ENABLE_RECURSIVE_CRAWLING: bool = false;
pub const DEFAULT_FOLLOW_INTERNAL_LINKS: bool = true;
pub const DEFAULT_FOLLOW_EXTERNAL_LINKS: bool = false;
pub const DEFAULT_INCLUDE_PATTERNS: &str = "";
pub const DEFAULT_EXCLUDE_PATTERNS: &str = "";

/// Upper bound on HTML handed to content extraction
pub const MAX_HTML_CHARS_TO_PROCESS: usize = 1_500_000;

/// Selectors appended to the removal list in documentation mode
pub const DOCUMENTATION_SELECTORS: &[&str] = &[
    ".sidebar, .navigation, .toc, .breadcrumb",
    ".search-box, .search-results",
    ".advertisement, .ads, .sponsor",
    ".comment-section, .comments",
    ".related-posts, .suggestions",
    ".footer-nav, .footer-links",
    ".social-share, .share-buttons",
    ".version-selector, .language-selector",
    ".edit-button, .contribute-link",
];

/// Depth used in documentation mode when the caller left `maxDepth` unset
pub const DOCUMENTATION_MAX_DEPTH: u32 = 3;

/// Page budget used in documentation mode when the caller left `maxPagesPerDomain` unset
pub const DOCUMENTATION_MAX_PAGES_PER_DOMAIN: u32 = 50;

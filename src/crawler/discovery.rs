//! Link discovery engine
//!
//! Given a parsed page, this module decides which outbound links are eligible to
//! be enqueued next under the crawl's traversal constraints:
//! - internal/external following policy
//! - include/exclude path globs
//! - duplicate suppression against the crawl's visited set
//! - live per-domain page budgets
//!
//! Discovery never mutates the visited set. Committing accepted links is the
//! orchestrator's job, so calling `discover` twice on an unchanged set yields the
//! same output.

use crate::config::LinkDiscoveryOptions;
use crate::state::VisitedSet;
use crate::url::{resolve, PathFilter};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

/// A link accepted for enqueueing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredLink {
    /// Canonical absolute URL
    pub url: String,

    /// Anchor text, or the URL path when the anchor has no text
    pub title: String,

    /// Depth of the target page (source depth + 1)
    pub depth: u32,

    /// Whether the link stays on the crawl's base domain
    pub is_internal: bool,
}

/// Link discovery with compiled traversal options
///
/// Built once per crawl; glob patterns are compiled up front and reused for every
/// page.
#[derive(Debug, Clone)]
pub struct LinkDiscovery {
    options: LinkDiscoveryOptions,
    filter: PathFilter,
}

impl LinkDiscovery {
    pub fn new(options: LinkDiscoveryOptions) -> Self {
        let filter = PathFilter::new(&options.include_patterns, &options.exclude_patterns);
        Self { options, filter }
    }

    pub fn options(&self) -> &LinkDiscoveryOptions {
        &self.options
    }

    /// Returns the links on `document` that may be enqueued
    ///
    /// `page_url` is the URL the document was fetched from and is the base for
    /// relative hrefs. `source_depth` is the depth of that page.
    ///
    /// Anchors are processed in document order and the output keeps that order.
    /// Links are not deduplicated within one call: two anchors pointing at the same
    /// uncommitted URL both appear.
    ///
    /// # Example
    ///
    /// ```
    /// use scraper::Html;
    /// use url::Url;
    /// use trailhead::config::LinkDiscoveryOptions;
    /// use trailhead::crawler::LinkDiscovery;
    /// use trailhead::state::VisitedSet;
    ///
    /// let base = Url::parse("https://example.com/docs").unwrap();
    /// let discovery = LinkDiscovery::new(LinkDiscoveryOptions::new(base.clone()));
    /// let html = Html::parse_document(r#"<a href="/docs/intro">Intro</a>"#);
    ///
    /// let links = discovery.discover(&html, &base, &VisitedSet::new(), 0);
    /// assert_eq!(links[0].url, "https://example.com/docs/intro");
    /// assert_eq!(links[0].depth, 1);
    /// ```
    pub fn discover(
        &self,
        document: &Html,
        page_url: &Url,
        visited: &VisitedSet,
        source_depth: u32,
    ) -> Vec<DiscoveredLink> {
        let target_depth = source_depth.saturating_add(1);
        if target_depth > self.options.max_depth {
            tracing::debug!(
                "Not discovering links on {}: depth {} would exceed max depth {}",
                page_url,
                target_depth,
                self.options.max_depth
            );
            return Vec::new();
        }

        let Ok(anchor_selector) = Selector::parse("a") else {
            return Vec::new();
        };

        let mut links = Vec::new();
        let mut anchors = 0usize;

        for element in document.select(&anchor_selector) {
            anchors += 1;
            if let Some(link) = self.evaluate(element, page_url, visited, target_depth) {
                links.push(link);
            }
        }

        tracing::info!(
            "Found {} anchors on {}, accepted {} links",
            anchors,
            page_url,
            links.len()
        );

        links
    }

    /// Runs one anchor through the acceptance rules
    fn evaluate(
        &self,
        element: ElementRef<'_>,
        page_url: &Url,
        visited: &VisitedSet,
        depth: u32,
    ) -> Option<DiscoveredLink> {
        let href = element.value().attr("href")?;

        let resolved = match resolve(href, page_url, &self.options.base_url) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!("Skipping invalid link '{}': {}", href, e);
                return None;
            }
        };

        let url = resolved.canonical();

        if resolved.is_internal && !self.options.follow_internal_links {
            tracing::debug!("Skipping internal link {}: internal links not followed", url);
            return None;
        }

        if !resolved.is_internal && !self.options.follow_external_links {
            tracing::debug!("Skipping external link {}: external links not followed", url);
            return None;
        }

        let path = resolved.path();
        if !self.filter.allows(path) {
            tracing::debug!("Skipping {}: path {} rejected by patterns", url, path);
            return None;
        }

        if visited.has(url) {
            tracing::debug!("Skipping {}: already visited", url);
            return None;
        }

        if resolved.is_internal {
            let domain = resolved.domain().unwrap_or_default();
            let count = visited.count_for_domain(&domain);
            if count >= self.options.max_pages_per_domain as usize {
                tracing::debug!(
                    "Skipping {}: domain {} reached its budget of {} pages",
                    url,
                    domain,
                    self.options.max_pages_per_domain
                );
                return None;
            }
        }

        let text = anchor_text(element);
        let title = if text.is_empty() {
            path.to_string()
        } else {
            text
        };

        Some(DiscoveredLink {
            url: url.to_string(),
            title,
            depth,
            is_internal: resolved.is_internal,
        })
    }
}

/// Discovers links with options compiled for this call only
///
/// Prefer a long-lived [`LinkDiscovery`] when processing many pages.
pub fn discover_links(
    document: &Html,
    page_url: &Url,
    options: &LinkDiscoveryOptions,
    visited: &VisitedSet,
    source_depth: u32,
) -> Vec<DiscoveredLink> {
    LinkDiscovery::new(options.clone()).discover(document, page_url, visited, source_depth)
}

/// Extracts the page title from the HTML document
pub fn page_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Anchor text, trimmed, with inner whitespace runs collapsed to one space
fn anchor_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

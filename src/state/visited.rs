use crate::url::domain_key;
use dashmap::{DashMap, DashSet};
use url::Url;

/// Crawl-wide record of committed URLs
///
/// One instance exists per crawl. The orchestrator owns it and lends it to every
/// discovery call by reference; nothing here is global.
///
/// `add` is an atomic insert-if-absent, so two in-flight pages can never both
/// commit the same URL. Per-domain counters are bumped after the insert succeeds
/// and are read without a global lock: a budget check racing an insert may see
/// the count one step behind, admitting at most one extra page per concurrent
/// committer over the domain budget.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
    domain_counts: DashMap<String, usize>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the canonical URL has already been committed
    pub fn has(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Commits a URL
    ///
    /// Returns `true` if the URL was newly inserted, `false` if it was already present.
    /// The domain counter only grows on a fresh insert.
    pub fn add(&self, url: &Url) -> bool {
        if !self.urls.insert(url.as_str().to_string()) {
            return false;
        }

        if let Some(domain) = domain_key(url) {
            *self.domain_counts.entry(domain).or_insert(0) += 1;
        }

        true
    }

    /// Commits a URL only while its domain is under `budget`
    ///
    /// The count check and the increment happen under the domain's map entry, so
    /// concurrent callers committing to one domain never overshoot the budget.
    /// URLs without a host are committed without a budget.
    pub fn add_within_budget(&self, url: &Url, budget: usize) -> bool {
        let Some(domain) = domain_key(url) else {
            return self.urls.insert(url.as_str().to_string());
        };

        let mut count = self.domain_counts.entry(domain).or_insert(0);
        if *count >= budget {
            return false;
        }

        if !self.urls.insert(url.as_str().to_string()) {
            return false;
        }

        *count += 1;
        true
    }

    /// Records a URL for deduplication without charging its domain budget
    ///
    /// Used for redirect targets: the page was already counted when the URL that
    /// redirected to it was committed.
    pub fn add_uncounted(&self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    /// Number of URLs committed for a domain key
    pub fn count_for_domain(&self, domain: &str) -> usize {
        self.domain_counts.get(domain).map(|c| *c).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

use crate::url::domain::{domain_key, same_domain};
use crate::UrlError;
use url::Url;

/// A hyperlink resolved against its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// Absolute URL with the fragment removed
    pub url: Url,

    /// Whether the URL shares its domain with the crawl's base URL
    pub is_internal: bool,
}

impl ResolvedUrl {
    /// The canonical string form, used as the deduplication key
    pub fn canonical(&self) -> &str {
        self.url.as_str()
    }

    /// The path component, used for pattern matching
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// The domain key of the resolved URL
    pub fn domain(&self) -> Option<String> {
        domain_key(&self.url)
    }
}

/// Resolves a raw `href` into a canonical absolute URL
///
/// `page` is the URL the href was found on and serves as the resolution base;
/// `base` is the crawl's base URL and decides internal vs external.
///
/// Canonicalization drops the fragment, so `/docs#intro` and `/docs` share one
/// deduplication key. Only `http` and `https` results are accepted; `mailto:`,
/// `javascript:` and similar references fail with [`UrlError::UnsupportedScheme`].
///
/// # Examples
///
/// ```
/// use url::Url;
/// use trailhead::url::resolve;
///
/// let base = Url::parse("https://example.com/docs").unwrap();
/// let resolved = resolve("/docs/intro", &base, &base).unwrap();
/// assert_eq!(resolved.canonical(), "https://example.com/docs/intro");
/// assert!(resolved.is_internal);
/// ```
pub fn resolve(href: &str, page: &Url, base: &Url) -> Result<ResolvedUrl, UrlError> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse {
            href: href.to_string(),
            message: "empty href".to_string(),
        });
    }

    let mut url = page.join(trimmed).map_err(|e| UrlError::Parse {
        href: href.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    url.set_fragment(None);

    let is_internal = same_domain(&url, base);

    Ok(ResolvedUrl { url, is_internal })
}

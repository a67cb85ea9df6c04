use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host, or `None` for URLs without one (`mailto:`, `data:`).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use trailhead::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the key under which a URL's domain is compared and counted
///
/// The key is the lowercase host with a leading `www.` removed, so
/// `https://www.example.com` and `http://example.com:8080` share one domain budget.
/// Scheme and port never take part in the comparison.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use trailhead::url::domain_key;
///
/// let url = Url::parse("http://WWW.Example.com:8080/a").unwrap();
/// assert_eq!(domain_key(&url), Some("example.com".to_string()));
/// ```
pub fn domain_key(url: &Url) -> Option<String> {
    extract_domain(url).map(|host| match host.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => host,
    })
}

/// Returns true when both URLs belong to the same domain
pub fn same_domain(a: &Url, b: &Url) -> bool {
    match (domain_key(a), domain_key(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

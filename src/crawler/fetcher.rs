//! HTTP fetcher implementation
//!
//! A deliberately thin page fetcher: one GET per URL, redirects followed by the
//! client, no retries. Its only job is to hand HTML bodies to the discovery
//! engine.

use crate::CrawlError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("trailhead/", env!("CARGO_PKG_VERSION"));

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    pub content_type: String,

    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Whether the body should be parsed for links
    pub fn is_html(&self) -> bool {
        let content_type = self.content_type.to_ascii_lowercase();
        content_type.contains("text/html") || content_type.contains("application/xhtml")
    }
}

/// Builds an HTTP client with the request timeout applied to every request
pub fn build_http_client(request_timeout_secs: u32) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(u64::from(request_timeout_secs)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL
///
/// Non-success statuses are returned as [`CrawlError::HttpStatus`]; transport
/// failures as [`CrawlError::Timeout`] or [`CrawlError::Http`].
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, CrawlError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

fn classify_error(url: &Url, error: reqwest::Error) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

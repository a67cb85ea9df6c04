use crate::config::schema::{self, NumericBounds};
use crate::config::types::{
    CrawlOptions, NumberInput, OutputFormat, PatternInput, RawInput, ScrapingTool, SerpProxyGroup,
};
use crate::ConfigError;

/// Validates raw input and fills defaults
///
/// The query is required. Use [`normalize_for_standby`] to prepare options before
/// any query is known.
///
/// # Examples
///
/// ```
/// use trailhead::config::{normalize, RawInput};
///
/// let raw = RawInput {
///     query: Some("https://example.com/docs".to_string()),
///     ..Default::default()
/// };
/// let options = normalize(&raw).unwrap();
/// assert_eq!(options.max_depth, 2);
/// assert_eq!(options.max_pages_per_domain, 20);
/// ```
pub fn normalize(raw: &RawInput) -> Result<CrawlOptions, ConfigError> {
    validate_and_fill(raw, false)
}

/// Validates raw input for standby initialization, where the query may be absent
pub fn normalize_for_standby(raw: &RawInput) -> Result<CrawlOptions, ConfigError> {
    validate_and_fill(raw, true)
}

/// Builds a new `CrawlOptions` from `raw` without touching the caller's value
fn validate_and_fill(raw: &RawInput, standby_init: bool) -> Result<CrawlOptions, ConfigError> {
    let query = raw
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string);

    if query.is_none() && !standby_init {
        return Err(ConfigError::UserInput(
            "The `query` parameter must be provided and non-empty.".to_string(),
        ));
    }

    let max_results = clamp_number(raw.max_results.as_ref(), &schema::MAX_RESULTS);
    let output_formats = validate_output_formats(raw.output_formats.as_deref())?;
    let request_timeout_secs =
        clamp_number(raw.request_timeout_secs.as_ref(), &schema::REQUEST_TIMEOUT_SECS);
    let serp_proxy_group = validate_serp_proxy_group(raw.serp_proxy_group.as_deref())?;
    let serp_max_retries = clamp_number(raw.serp_max_retries.as_ref(), &schema::SERP_MAX_RETRIES);
    let scraping_tool = validate_scraping_tool(raw.scraping_tool.as_deref())?;

    let mut remove_elements_css_selector = non_empty(raw.remove_elements_css_selector.as_deref())
        .unwrap_or(schema::DEFAULT_REMOVE_ELEMENTS_CSS_SELECTOR)
        .to_string();
    let html_transformer = non_empty(raw.html_transformer.as_deref())
        .unwrap_or(schema::DEFAULT_HTML_TRANSFORMER)
        .to_string();

    let desired_concurrency =
        clamp_number(raw.desired_concurrency.as_ref(), &schema::DESIRED_CONCURRENCY);
    let max_request_retries =
        clamp_number(raw.max_request_retries.as_ref(), &schema::MAX_REQUEST_RETRIES);
    let dynamic_content_wait_secs =
        derive_dynamic_wait(raw.dynamic_content_wait_secs.as_ref(), request_timeout_secs);
    let readable_text_char_threshold = clamp_number(
        raw.readable_text_char_threshold.as_ref(),
        &schema::READABLE_TEXT_CHAR_THRESHOLD,
    );

    let remove_cookie_warnings = raw
        .remove_cookie_warnings
        .unwrap_or(schema::DEFAULT_REMOVE_COOKIE_WARNINGS);
    let debug_mode = raw.debug_mode.unwrap_or(schema::DEFAULT_DEBUG_MODE);
    let documentation_mode = raw
        .documentation_mode
        .unwrap_or(schema::DEFAULT_DOCUMENTATION_MODE);
    let mut enable_recursive_crawling = raw
        .enable_recursive_crawling
        .unwrap_or(schema::DEFAULT_ENABLE_RECURSIVE_CRAWLING);

    let mut max_depth = clamp_number(raw.max_depth.as_ref(), &schema::MAX_DEPTH);
    let mut max_pages_per_domain =
        clamp_number(raw.max_pages_per_domain.as_ref(), &schema::MAX_PAGES_PER_DOMAIN);

    let follow_internal_links = raw
        .follow_internal_links
        .unwrap_or(schema::DEFAULT_FOLLOW_INTERNAL_LINKS);
    let follow_external_links = raw
        .follow_external_links
        .unwrap_or(schema::DEFAULT_FOLLOW_EXTERNAL_LINKS);

    let include_patterns =
        join_patterns(raw.include_patterns.as_ref(), schema::DEFAULT_INCLUDE_PATTERNS);
    let exclude_patterns =
        join_patterns(raw.exclude_patterns.as_ref(), schema::DEFAULT_EXCLUDE_PATTERNS);

    if documentation_mode {
        remove_elements_css_selector = std::iter::once(remove_elements_css_selector.as_str())
            .chain(schema::DOCUMENTATION_SELECTORS.iter().copied())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        enable_recursive_crawling = true;

        // Only fields the caller left unset pick up the documentation defaults
        if raw.max_depth.is_none() {
            max_depth = schema::DOCUMENTATION_MAX_DEPTH;
        }
        if raw.max_pages_per_domain.is_none() {
            max_pages_per_domain = schema::DOCUMENTATION_MAX_PAGES_PER_DOMAIN;
        }

        tracing::info!(
            "Documentation mode: recursive crawling on, maxDepth {}, maxPagesPerDomain {}",
            max_depth,
            max_pages_per_domain
        );
    }

    Ok(CrawlOptions {
        query,
        max_results,
        output_formats,
        request_timeout_secs,
        serp_proxy_group,
        serp_max_retries,
        scraping_tool,
        remove_elements_css_selector,
        html_transformer,
        desired_concurrency,
        max_request_retries,
        dynamic_content_wait_secs,
        readable_text_char_threshold,
        remove_cookie_warnings,
        debug_mode,
        documentation_mode,
        enable_recursive_crawling,
        max_depth,
        max_pages_per_domain,
        follow_internal_links,
        follow_external_links,
        include_patterns,
        exclude_patterns,
    })
}

/// Coerces a numeric input into `bounds`
///
/// Missing values take the default. Strings are parsed as numbers; a string that
/// does not parse falls back to the default. Out-of-range values are clamped with
/// a warning and never fail.
fn clamp_number(value: Option<&NumberInput>, bounds: &NumericBounds) -> u32 {
    let Some(value) = value else {
        tracing::info!(
            "The `{}` parameter is not defined. Using the default value {}.",
            bounds.field,
            bounds.default
        );
        return bounds.default;
    };

    let Some(number) = to_number(value) else {
        tracing::warn!(
            "The `{}` parameter must be a number, but was {:?}. Using the default value {}.",
            bounds.field,
            value,
            bounds.default
        );
        return bounds.default;
    };

    if number < bounds.min as f64 {
        tracing::warn!(
            "The `{}` parameter must be at least {}, but was {}. Using {} instead.",
            bounds.field,
            bounds.min,
            number,
            bounds.min
        );
        return bounds.min;
    }

    if number > bounds.max as f64 {
        tracing::warn!(
            "The `{}` parameter must be at most {}, but was {}. Using {} instead.",
            bounds.field,
            bounds.max,
            number,
            bounds.max
        );
        return bounds.max;
    }

    number.round() as u32
}

fn to_number(value: &NumberInput) -> Option<f64> {
    let number = match value {
        NumberInput::Number(n) => *n,
        NumberInput::Text(s) => s.trim().parse::<f64>().ok()?,
    };

    number.is_finite().then_some(number)
}

/// Keeps the dynamic content wait below the request timeout
///
/// An unset, zero or unparsable wait, or one that reaches the request timeout, is
/// replaced by half the timeout rounded to the nearest second.
fn derive_dynamic_wait(value: Option<&NumberInput>, request_timeout_secs: u32) -> u32 {
    match value.and_then(to_number) {
        Some(wait) if wait > 0.0 && wait < request_timeout_secs as f64 => wait.round() as u32,
        _ => (request_timeout_secs + 1) / 2,
    }
}

fn validate_output_formats(formats: Option<&[String]>) -> Result<Vec<OutputFormat>, ConfigError> {
    match formats {
        None | Some([]) => {
            tracing::info!(
                "The `outputFormats` parameter is not defined. Using default value `markdown`."
            );
            Ok(vec![OutputFormat::Markdown])
        }
        Some(formats) => formats
            .iter()
            .map(|f| f.parse::<OutputFormat>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                ConfigError::UserInput(
                    "The `outputFormats` array may only contain `text`, `markdown`, or `html`."
                        .to_string(),
                )
            }),
    }
}

fn validate_serp_proxy_group(group: Option<&str>) -> Result<SerpProxyGroup, ConfigError> {
    match non_empty(group) {
        None => Ok(SerpProxyGroup::GoogleSerp),
        Some(group) => group.parse().map_err(|_| {
            ConfigError::UserInput(
                "The `serpProxyGroup` parameter must be either `GOOGLE_SERP` or `SHADER`."
                    .to_string(),
            )
        }),
    }
}

fn validate_scraping_tool(tool: Option<&str>) -> Result<ScrapingTool, ConfigError> {
    match non_empty(tool) {
        None => Ok(ScrapingTool::RawHttp),
        Some(tool) => tool.parse().map_err(|_| {
            ConfigError::UserInput(
                "The `scrapingTool` parameter must be either `browser-playwright` or `raw-http`."
                    .to_string(),
            )
        }),
    }
}

fn join_patterns(patterns: Option<&PatternInput>, default: &str) -> String {
    patterns
        .map(PatternInput::joined)
        .unwrap_or_else(|| default.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

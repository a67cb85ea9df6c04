use crate::PatternError;
use regex::{Regex, RegexBuilder};

/// Upper bound on the compiled size of a single glob
const PATTERN_SIZE_LIMIT: usize = 256 * 1024;

/// A single compiled path glob
///
/// Two forms are supported:
/// 1. Open prefix: a pattern ending in `**` matches any path starting with the
///    text before the `**` (`/docs/**` matches `/docs/intro/setup`).
/// 2. Anchored glob: anything else must match the whole path, with `*` matching
///    any run of characters and `?` exactly one character. All other characters,
///    `.` included, match literally.
#[derive(Debug, Clone)]
pub enum GlobPattern {
    Prefix(String),
    Anchored(Regex),
}

impl GlobPattern {
    /// Compiles one glob string
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead::url::GlobPattern;
    ///
    /// let glob = GlobPattern::compile("/blog/*.html").unwrap();
    /// assert!(glob.matches("/blog/post.html"));
    /// assert!(!glob.matches("/blog/post_html"));
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if let Some(prefix) = pattern.strip_suffix("**") {
            return Ok(Self::Prefix(prefix.to_string()));
        }

        let mut source = String::with_capacity(pattern.len() * 2 + 2);
        source.push('^');
        for ch in pattern.chars() {
            match ch {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                _ => source.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
            }
        }
        source.push('$');

        RegexBuilder::new(&source)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map(Self::Anchored)
            .map_err(|source| PatternError::Compile {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Returns true if the path matches this glob
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
            Self::Anchored(regex) => regex.is_match(path),
        }
    }
}

/// An ordered list of globs parsed from a comma-separated string
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<GlobPattern>,
    configured: usize,
}

impl PatternSet {
    /// Parses a comma-separated glob list
    ///
    /// Entries are trimmed and empty entries dropped. A glob that fails to compile
    /// is logged and left out, so it never matches anything, but it still counts
    /// as configured.
    pub fn parse(joined: &str) -> Self {
        let mut configured = 0;
        let patterns = split_patterns(joined)
            .inspect(|_| configured += 1)
            .filter_map(|raw| match GlobPattern::compile(raw) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Pattern will never match: {}", e);
                    None
                }
            })
            .collect();

        Self {
            patterns,
            configured,
        }
    }

    /// Returns true if no patterns were configured at all
    ///
    /// A list holding only invalid globs is not empty.
    pub fn is_empty(&self) -> bool {
        self.configured == 0
    }

    /// Number of globs that compiled
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if any glob in the set matches the path
    pub fn any_match(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

/// Include/exclude filter over URL paths
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: PatternSet,
    exclude: PatternSet,
}

impl PathFilter {
    pub fn new(include: &str, exclude: &str) -> Self {
        Self {
            include: PatternSet::parse(include),
            exclude: PatternSet::parse(exclude),
        }
    }

    /// Decides whether a path passes the filter
    ///
    /// Exclusion wins over inclusion. An empty include list admits every path that
    /// is not excluded.
    pub fn allows(&self, path: &str) -> bool {
        if self.exclude.any_match(path) {
            return false;
        }

        self.include.is_empty() || self.include.any_match(path)
    }
}

/// Checks a path against comma-separated include and exclude globs
///
/// # Examples
///
/// ```
/// use trailhead::url::matches_patterns;
///
/// assert!(matches_patterns("/docs/intro", "/docs/**", ""));
/// assert!(!matches_patterns("/blog/post", "/docs/**", ""));
/// assert!(!matches_patterns("/docs/old", "/docs/**", "/docs/old"));
/// ```
pub fn matches_patterns(path: &str, include: &str, exclude: &str) -> bool {
    PathFilter::new(include, exclude).allows(path)
}

/// Splits a comma-joined pattern string into trimmed, non-empty entries
pub fn split_patterns(joined: &str) -> impl Iterator<Item = &str> {
    joined.split(',').map(str::trim).filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern() {
        let glob = GlobPattern::compile("/docs/**").unwrap();
        assert!(glob.matches("/docs/intro"));
        assert!(glob.matches("/docs/"));
        assert!(glob.matches("/docs/a/b/c"));
        assert!(!glob.matches("/blog/post"));
        assert!(!glob.matches("/doc"));
    }

    #[test]
    fn test_double_star_alone_matches_everything() {
        let glob = GlobPattern::compile("**").unwrap();
        assert!(glob.matches("/"));
        assert!(glob.matches("/anything/at/all"));
    }

    #[test]
    fn test_star_matches_any_run() {
        let glob = GlobPattern::compile("/blog/*").unwrap();
        assert!(glob.matches("/blog/"));
        assert!(glob.matches("/blog/post"));
        assert!(glob.matches("/blog/2024/post"));
        assert!(!glob.matches("/news/post"));
    }

    #[test]
    fn test_question_mark_matches_single_char() {
        let glob = GlobPattern::compile("/v?/api").unwrap();
        assert!(glob.matches("/v1/api"));
        assert!(glob.matches("/v2/api"));
        assert!(!glob.matches("/v10/api"));
        assert!(!glob.matches("/v/api"));
    }

    #[test]
    fn test_anchored_at_both_ends() {
        let glob = GlobPattern::compile("/docs").unwrap();
        assert!(glob.matches("/docs"));
        assert!(!glob.matches("/docs/intro"));
        assert!(!glob.matches("/en/docs"));
    }

    #[test]
    fn test_dot_is_literal() {
        let glob = GlobPattern::compile("/file.pdf").unwrap();
        assert!(glob.matches("/file.pdf"));
        assert!(!glob.matches("/fileXpdf"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let glob = GlobPattern::compile("/a+b/(c)").unwrap();
        assert!(glob.matches("/a+b/(c)"));
        assert!(!glob.matches("/aab/c"));
    }

    #[test]
    fn test_oversized_pattern_fails_to_compile() {
        let huge = "?".repeat(100_000);
        assert!(matches!(
            GlobPattern::compile(&huge),
            Err(PatternError::Compile { .. })
        ));
    }

    #[test]
    fn test_parse_trims_and_drops_empty_entries() {
        let set = PatternSet::parse(" /docs/** , ,/api/*,");
        assert_eq!(set.len(), 2);
        assert!(set.any_match("/docs/x"));
        assert!(set.any_match("/api/v1"));
    }

    #[test]
    fn test_parse_skips_bad_pattern() {
        let joined = format!("/docs/**,{}", "?".repeat(100_000));
        let set = PatternSet::parse(&joined);
        assert_eq!(set.len(), 1);
        assert!(!set.any_match(&"x".repeat(100_000)));
    }

    #[test]
    fn test_invalid_include_pattern_matches_nothing() {
        let bad = "?".repeat(100_000);
        let set = PatternSet::parse(&bad);
        assert!(!set.is_empty());
        assert_eq!(set.len(), 0);

        assert!(!matches_patterns("/anything", &bad, ""));
        assert!(!matches_patterns("/", &bad, ""));
    }

    #[test]
    fn test_invalid_exclude_pattern_excludes_nothing() {
        let bad = "?".repeat(100_000);
        assert!(matches_patterns("/docs/intro", "/docs/**", &bad));
    }

    #[test]
    fn test_no_patterns_includes_everything() {
        assert!(matches_patterns("/anything", "", ""));
        assert!(matches_patterns("/", "  ,  ", ""));
    }

    #[test]
    fn test_include_requires_match() {
        assert!(matches_patterns("/docs/intro", "/docs/**", ""));
        assert!(!matches_patterns("/blog/post", "/docs/**", ""));
    }

    #[test]
    fn test_include_any_of_several() {
        let include = "/docs/**,/guide/*";
        assert!(matches_patterns("/guide/start", include, ""));
        assert!(matches_patterns("/docs/intro", include, ""));
        assert!(!matches_patterns("/pricing", include, ""));
    }

    #[test]
    fn test_exclude_has_priority() {
        assert!(!matches_patterns("/docs/old/page", "/docs/**", "/docs/old/**"));
        assert!(!matches_patterns("/docs/intro", "/docs/intro", "/docs/intro"));
        assert!(matches_patterns("/docs/new/page", "/docs/**", "/docs/old/**"));
    }

    #[test]
    fn test_exclude_without_include() {
        assert!(!matches_patterns("/admin/login", "", "/admin/**"));
        assert!(matches_patterns("/home", "", "/admin/**"));
    }
}

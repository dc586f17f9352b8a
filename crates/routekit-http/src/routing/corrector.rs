//! Path normalization and joining.
//!
//! [`PathCorrector`] turns a raw path into its canonical form and joins a
//! prefix with a path, for call paths and mounted route templates. It does not
//! collapse double slashes: `"/api/" + "/x"` stays `"/api//x"`, and the empty
//! interior segment then fails to match any template segment.

/// Canonicalizes and joins request paths.
///
/// # Examples
///
/// ```
/// use routekit_http::routing::corrector::PathCorrector;
///
/// assert_eq!(PathCorrector::apply(Some("/api"), None), "/api");
/// assert_eq!(PathCorrector::apply(None, Some("/x")), "/x");
/// assert_eq!(PathCorrector::apply(None, None), "/");
/// assert_eq!(PathCorrector::apply(Some("/api"), Some("/x")), "/api/x");
///
/// assert_eq!(PathCorrector::correct(Some("/users/")).as_deref(), Some("/users"));
/// assert_eq!(PathCorrector::correct(Some("/")), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCorrector;

impl PathCorrector {
    /// Removes trailing slashes from a raw path.
    ///
    /// An absent path, an empty path, and a path made only of slashes are all
    /// "absent" (`None`), so that joining them with a prefix yields just the
    /// prefix, or `"/"` when there is no prefix either.
    pub fn correct(raw: Option<&str>) -> Option<String> {
        let trimmed = raw?.trim_end_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Joins a prefix and a path.
    ///
    /// - both absent: `"/"`
    /// - only one present: that one, unchanged
    /// - both present: `prefix + path`, with no separator inserted
    pub fn apply(prefix: Option<&str>, path: Option<&str>) -> String {
        match (prefix, path) {
            (None, None) => "/".to_string(),
            (Some(prefix), None) => prefix.to_string(),
            (None, Some(path)) => path.to_string(),
            (Some(prefix), Some(path)) => format!("{prefix}{path}"),
        }
    }
}

/// Splits a path into its `/`-delimited segments.
///
/// One leading and one trailing slash are ignored; `"/"` and `""` have no
/// segments. Interior empty segments are kept as empty strings.
///
/// # Examples
///
/// ```
/// use routekit_http::routing::corrector::split_segments;
///
/// assert_eq!(split_segments("/users/42"), ["users", "42"]);
/// assert_eq!(split_segments("/api//x"), ["api", "", "x"]);
/// assert!(split_segments("/").is_empty());
/// ```
pub fn split_segments(path: &str) -> Vec<String> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').map(String::from).collect()
}

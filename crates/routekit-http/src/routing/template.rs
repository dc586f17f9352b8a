//! Route path templates.
//!
//! A [`PathTemplate`] is parsed once, when a route is registered, from a
//! string such as `/users/{id}/orders/{orderId}`. Each `/`-delimited segment
//! is either a literal or a `{name}` parameter placeholder.

use std::collections::HashSet;
use std::fmt;

use routekit_core::{RouteError, RouteResult};

use super::corrector::split_segments;

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the request segment exactly (case-sensitive).
    Literal(String),
    /// Matches any non-empty request segment and captures it under this name.
    Param(String),
}

impl Segment {
    /// Returns `true` if this segment accepts the given request segment.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == value,
            Self::Param(_) => !value.is_empty(),
        }
    }

    /// Returns the parameter name, if this is a parameter segment.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Param(name) => Some(name.as_str()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Param(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// An immutable, parsed path template.
///
/// # Examples
///
/// ```
/// use routekit_http::routing::template::{PathTemplate, Segment};
///
/// let template = PathTemplate::parse("/users/{id}").unwrap();
/// assert_eq!(template.segments(), &[
///     Segment::Literal("users".to_string()),
///     Segment::Param("id".to_string()),
/// ]);
/// assert_eq!(template.param_names().collect::<Vec<_>>(), ["id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidTemplate`] if a segment is empty (`//`),
    /// a placeholder is malformed (`{id`, `{}`, `a{b}`, `{a-b}`), or a
    /// parameter name is used twice.
    pub fn parse(route: &str) -> RouteResult<Self> {
        let mut segments = Vec::new();
        let mut seen = HashSet::new();

        for part in split_segments(route) {
            let segment = parse_segment(route, &part)?;
            if let Segment::Param(name) = &segment {
                if !seen.insert(name.clone()) {
                    return Err(RouteError::InvalidTemplate(format!(
                        "parameter '{name}' appears more than once in '{route}'"
                    )));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: route.to_string(),
            segments,
        })
    }

    /// Returns the template string as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root template (`/` or empty).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the parameter names, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Returns `true` if both templates have the same shape: equal literals
    /// at the same positions and parameters at the same positions, whatever
    /// the parameters are named.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Returns `true` if some concrete path is structurally matched by both
    /// templates.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segment(route: &str, part: &str) -> RouteResult<Segment> {
    if part.is_empty() {
        return Err(RouteError::InvalidTemplate(format!(
            "empty segment in '{route}'"
        )));
    }

    if let Some(inner) = part.strip_prefix('{') {
        let name = inner.strip_suffix('}').ok_or_else(|| {
            RouteError::InvalidTemplate(format!("unclosed brace in '{route}'"))
        })?;
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RouteError::InvalidTemplate(format!(
                "invalid parameter name '{name}' in '{route}'"
            )));
        }
        return Ok(Segment::Param(name.to_string()));
    }

    if part.contains(['{', '}']) {
        return Err(RouteError::InvalidTemplate(format!(
            "placeholder must span a whole segment: '{part}' in '{route}'"
        )));
    }

    Ok(Segment::Literal(part.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn param(s: &str) -> Segment {
        Segment::Param(s.to_string())
    }

    #[test]
    fn test_parse_literals_and_params() {
        let t = PathTemplate::parse("/users/{id}/orders/{orderId}").unwrap();
        assert_eq!(
            t.segments(),
            &[literal("users"), param("id"), literal("orders"), param("orderId")]
        );
        assert_eq!(t.param_names().collect::<Vec<_>>(), ["id", "orderId"]);
        assert_eq!(t.as_str(), "/users/{id}/orders/{orderId}");
    }

    #[test]
    fn test_parse_root() {
        let t = PathTemplate::parse("/").unwrap();
        assert!(t.is_empty());
        let t = PathTemplate::parse("").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn test_parse_trailing_slash_ignored() {
        let t = PathTemplate::parse("/ping/").unwrap();
        assert_eq!(t.segments(), &[literal("ping")]);
    }

    #[test]
    fn test_parse_rejects_malformed_placeholders() {
        for route in ["/users/{id", "/users/{}", "/users/a{b}", "/users/{a-b}", "/x/id}"] {
            let err = PathTemplate::parse(route).unwrap_err();
            assert!(
                matches!(err, RouteError::InvalidTemplate(_)),
                "expected InvalidTemplate for {route}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        assert!(PathTemplate::parse("/a//b").is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_param() {
        let err = PathTemplate::parse("/a/{id}/b/{id}").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_segment_accepts() {
        assert!(literal("users").accepts("users"));
        assert!(!literal("users").accepts("Users"));
        assert!(param("id").accepts("42"));
        assert!(!param("id").accepts(""));
    }

    #[test]
    fn test_same_shape_ignores_param_names() {
        let a = PathTemplate::parse("/users/{id}").unwrap();
        let b = PathTemplate::parse("/users/{userId}").unwrap();
        let c = PathTemplate::parse("/users/me").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }

    #[test]
    fn test_overlaps() {
        let a = PathTemplate::parse("/users/{id}").unwrap();
        let b = PathTemplate::parse("/users/me").unwrap();
        let c = PathTemplate::parse("/teams/{id}").unwrap();
        let d = PathTemplate::parse("/users/{id}/orders").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_display() {
        let t = PathTemplate::parse("/users/{id}").unwrap();
        assert_eq!(t.to_string(), "/users/{id}");
        assert_eq!(param("id").to_string(), "{id}");
    }
}

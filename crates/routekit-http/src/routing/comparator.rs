//! Structural path comparison.
//!
//! The comparator answers one question: could this route's template produce
//! this request's path? The HTTP method is not considered here.

use crate::request::RouteRequest;

use super::table::RouteTemplate;
use super::template::PathTemplate;

/// Decides structural compatibility between a route template and a request.
///
/// Segment counts must be equal, literal segments must be equal
/// (case-sensitive), and parameter segments accept any non-empty value. The
/// captured values are not validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathComparator;

impl PathComparator {
    /// Returns `true` if the route's template structurally matches the
    /// request's path segments.
    pub fn matches(route: &RouteTemplate, request: &RouteRequest) -> bool {
        Self::matches_segments(route.template(), request.path_parts())
    }

    /// Returns `true` if the template structurally matches the given segments.
    pub fn matches_segments(template: &PathTemplate, parts: &[String]) -> bool {
        template.len() == parts.len()
            && template
                .segments()
                .iter()
                .zip(parts)
                .all(|(segment, part)| segment.accepts(part))
    }
}

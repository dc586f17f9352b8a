//! Path parameter extraction.

use std::collections::HashMap;

use super::table::RouteTemplate;
use super::template::Segment;

/// Captures the values of a matched route's parameter segments.
///
/// Walks the template and the request segments in lock-step and records
/// `(name, value)` for every parameter segment. Literal segments contribute
/// nothing.
///
/// Must only be called after [`PathComparator`](super::comparator::PathComparator)
/// has accepted the pair. Extraction itself never fails; for a pair that does
/// not match, the result is unspecified.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use routekit_http::routing::params::extract_params;
/// use routekit_http::routing::table::RouteTemplate;
/// use routekit_http::{RouteRequest, RouteResponse};
///
/// let handler = Arc::new(|_req: RouteRequest, resp: RouteResponse| -> routekit_http::BoxFuture {
///     Box::pin(async move { resp })
/// });
/// let route = RouteTemplate::new(http::Method::GET, "/users/{id}/orders/{orderId}", handler).unwrap();
/// let parts: Vec<String> = ["users", "42", "orders", "7"].iter().map(|s| s.to_string()).collect();
///
/// let params = extract_params(&route, &parts);
/// assert_eq!(params["id"], "42");
/// assert_eq!(params["orderId"], "7");
/// ```
pub fn extract_params(route: &RouteTemplate, request_parts: &[String]) -> HashMap<String, String> {
    let segments = route.template().segments();
    debug_assert_eq!(
        segments.len(),
        request_parts.len(),
        "extract_params called on a non-matching route"
    );

    segments
        .iter()
        .zip(request_parts)
        .filter_map(|(segment, value)| match segment {
            Segment::Param(name) => Some((name.clone(), value.clone())),
            Segment::Literal(_) => None,
        })
        .collect()
}

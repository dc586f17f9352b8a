//! HTTP method matching.

use crate::request::RouteRequest;

use super::table::RouteTemplate;

/// Decides whether a route accepts a request's HTTP method.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestMatcher;

impl RequestMatcher {
    /// Returns `true` iff the route's method equals the request's method.
    ///
    /// There is no aliasing: a `HEAD` request does not match a `GET` route.
    pub fn match_http_method(route: &RouteTemplate, request: &RouteRequest) -> bool {
        route.method() == request.method()
    }
}

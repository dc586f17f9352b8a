//! The two-stage resolution pipeline.
//!
//! Candidates are filtered by path first and by HTTP method second. Keeping
//! the stages apart is what lets a caller tell "no such resource" (404) from
//! "resource exists, wrong verb" (405).

use std::collections::HashMap;
use std::sync::Arc;

use routekit_core::logging::resolve_span;
use routekit_core::{RouteError, RouteResult};

use crate::request::RouteRequest;

use super::comparator::PathComparator;
use super::matcher::RequestMatcher;
use super::params::extract_params;
use super::table::{RouteTable, RouteTemplate};

/// The outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    /// The matched route.
    pub route: Arc<RouteTemplate>,
    /// Captured path parameters, keyed by parameter name.
    pub params: HashMap<String, String>,
}

impl ResolvedRoute {
    /// Returns a captured path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Resolves a request against a route table.
///
/// The request path is expected to be canonical already, i.e. produced by
/// [`PathCorrector::apply`](super::corrector::PathCorrector::apply). Neither
/// the table nor the request is modified.
///
/// If overlapping routes were allowed at registration, the route registered
/// first wins.
///
/// # Errors
///
/// - [`RouteError::NoPathMatch`] if no template structurally matches the
///   request path.
/// - [`RouteError::MethodMismatch`] if some template matches the path but
///   none of those accepts the request method. `allowed` lists the methods
///   that matched the path, sorted and deduplicated.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use routekit_core::{MatchStage, Settings};
/// use routekit_http::routing::resolver::resolve;
/// use routekit_http::routing::table::RouteTableBuilder;
/// use routekit_http::{RouteRequest, RouteResponse};
///
/// let pong = Arc::new(|_req: RouteRequest, resp: RouteResponse| -> routekit_http::BoxFuture {
///     Box::pin(async move { resp })
/// });
/// let mut builder = RouteTableBuilder::new();
/// builder.get("/ping", pong);
/// let table = builder.build(&Settings::default()).unwrap();
///
/// let request = RouteRequest::builder().path("/ping").build();
/// let resolved = resolve(&table, &request).unwrap();
/// assert_eq!(resolved.route.route(), "/ping");
/// assert!(resolved.params.is_empty());
///
/// let request = RouteRequest::builder().method(http::Method::POST).path("/ping").build();
/// let err = resolve(&table, &request).unwrap_err();
/// assert_eq!(err.stage(), Some(MatchStage::PathMatchedMethodMismatch));
/// ```
pub fn resolve(table: &RouteTable, request: &RouteRequest) -> RouteResult<ResolvedRoute> {
    let span = resolve_span(request.method().as_str(), request.path());
    let _guard = span.enter();

    let path_matches: Vec<&Arc<RouteTemplate>> = table
        .routes()
        .iter()
        .filter(|route| PathComparator::matches(route, request))
        .collect();

    if path_matches.is_empty() {
        tracing::debug!(outcome = "no-path-match", "route resolution failed");
        return Err(RouteError::NoPathMatch {
            path: request.path().to_string(),
        });
    }

    let Some(route) = path_matches
        .iter()
        .find(|route| RequestMatcher::match_http_method(route, request))
    else {
        let mut allowed: Vec<String> = path_matches
            .iter()
            .map(|route| route.method().to_string())
            .collect();
        allowed.sort();
        allowed.dedup();
        tracing::debug!(
            outcome = "path-matched-method-mismatch",
            allowed = ?allowed,
            "route resolution failed"
        );
        return Err(RouteError::MethodMismatch {
            path: request.path().to_string(),
            method: request.method().to_string(),
            allowed,
        });
    };

    let params = extract_params(route, request.path_parts());
    tracing::debug!(
        outcome = "resolved",
        template = route.route(),
        params = params.len(),
        "route resolved"
    );
    Ok(ResolvedRoute {
        route: Arc::clone(route),
        params,
    })
}

/// Resolves a request and stores the captured parameters on it.
///
/// # Errors
///
/// Same as [`resolve`]. On failure the request is left untouched.
pub fn resolve_request(
    table: &RouteTable,
    request: &mut RouteRequest,
) -> RouteResult<Arc<RouteTemplate>> {
    let resolved = resolve(table, request)?;
    request.set_path_params(resolved.params);
    Ok(resolved.route)
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};
    use routekit_core::{MatchStage, Settings};

    use super::*;
    use crate::response::RouteResponse;
    use crate::routing::table::tests::{noop_handler, status_handler};
    use crate::routing::table::RouteTableBuilder;

    fn request(method: Method, path: &str) -> RouteRequest {
        RouteRequest::builder().method(method).path(path).build()
    }

    fn ping_table() -> RouteTable {
        let mut builder = RouteTableBuilder::new();
        builder.get("/ping", status_handler(StatusCode::OK));
        builder.build(&Settings::default()).unwrap()
    }

    fn users_table() -> RouteTable {
        let mut builder = RouteTableBuilder::new();
        builder
            .get("/users", noop_handler())
            .post("/users", noop_handler())
            .get("/users/{id}", noop_handler())
            .put("/users/{id}", noop_handler())
            .delete("/users/{id}", noop_handler())
            .get("/users/{id}/orders/{orderId}", noop_handler());
        builder.build(&Settings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_ping_scenario_resolves() {
        let table = ping_table();
        let resolved = resolve(&table, &request(Method::GET, "/ping")).unwrap();
        assert_eq!(resolved.route.route(), "/ping");
        assert!(resolved.params.is_empty());

        let response = resolved
            .route
            .execute(request(Method::GET, "/ping"), RouteResponse::new())
            .await;
        assert_eq!(response.status_code(), Some(StatusCode::OK));
    }

    #[test]
    fn test_ping_scenario_method_mismatch() {
        let err = resolve(&ping_table(), &request(Method::POST, "/ping")).unwrap_err();
        assert_eq!(err.stage(), Some(MatchStage::PathMatchedMethodMismatch));
        assert_eq!(
            err.to_string(),
            "There is no route suitable for path [/ping], method [POST]"
        );
    }

    #[test]
    fn test_ping_scenario_no_path_match() {
        let err = resolve(&ping_table(), &request(Method::GET, "/pong")).unwrap_err();
        assert_eq!(err.stage(), Some(MatchStage::NoPathMatch));
        assert_eq!(err.to_string(), "There is no route suitable for path [/pong]");
    }

    #[test]
    fn test_every_route_resolves_to_itself() {
        let table = users_table();
        let cases = [
            (Method::GET, "/users", "/users"),
            (Method::POST, "/users", "/users"),
            (Method::GET, "/users/1", "/users/{id}"),
            (Method::PUT, "/users/1", "/users/{id}"),
            (Method::DELETE, "/users/1", "/users/{id}"),
            (Method::GET, "/users/1/orders/2", "/users/{id}/orders/{orderId}"),
        ];
        for (method, path, expected) in cases {
            let resolved = resolve(&table, &request(method.clone(), path)).unwrap();
            assert_eq!(resolved.route.route(), expected, "{method} {path}");
            assert_eq!(resolved.route.method(), &method);
        }
    }

    #[test]
    fn test_param_extraction() {
        let table = users_table();
        let resolved = resolve(&table, &request(Method::GET, "/users/42/orders/7")).unwrap();
        let expected: HashMap<String, String> = [
            ("id".to_string(), "42".to_string()),
            ("orderId".to_string(), "7".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(resolved.params, expected);
        assert_eq!(resolved.param("id"), Some("42"));
    }

    #[test]
    fn test_unmatched_paths() {
        let table = users_table();
        for path in ["/", "/teams", "/users/1/orders", "/Users", "/users//orders/1"] {
            let err = resolve(&table, &request(Method::GET, path)).unwrap_err();
            assert!(
                matches!(err, RouteError::NoPathMatch { .. }),
                "expected NoPathMatch for {path}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_segment_count_mismatch_never_matches() {
        let mut builder = RouteTableBuilder::new();
        builder.get("/a/{b}", noop_handler());
        let table = builder.build(&Settings::default()).unwrap();
        let err = resolve(&table, &request(Method::GET, "/a")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_method_mismatch_lists_allowed_methods() {
        let table = users_table();
        let err = resolve(&table, &request(Method::PATCH, "/users/1")).unwrap_err();
        match err {
            RouteError::MethodMismatch {
                path,
                method,
                allowed,
            } => {
                assert_eq!(path, "/users/1");
                assert_eq!(method, "PATCH");
                assert_eq!(allowed, ["DELETE", "GET", "PUT"]);
            }
            other => panic!("expected MethodMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_head_is_not_aliased_to_get() {
        let err = resolve(&ping_table(), &request(Method::HEAD, "/ping")).unwrap_err();
        assert_eq!(err.stage(), Some(MatchStage::PathMatchedMethodMismatch));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = users_table();
        let request = request(Method::GET, "/users/9/orders/3");
        let first = resolve(&table, &request).unwrap();
        let second = resolve(&table, &request).unwrap();
        assert!(Arc::ptr_eq(&first.route, &second.route));
        assert_eq!(first.params, second.params);
        assert!(request.path_params().is_empty());
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let mut forward = RouteTableBuilder::new();
        forward
            .get("/users/{id}", noop_handler())
            .get("/users/{id}/orders", noop_handler());
        let mut backward = RouteTableBuilder::new();
        backward
            .get("/users/{id}/orders", noop_handler())
            .get("/users/{id}", noop_handler());

        for builder in [forward, backward] {
            let table = builder.build(&Settings::default()).unwrap();
            let resolved = resolve(&table, &request(Method::GET, "/users/1")).unwrap();
            assert_eq!(resolved.route.route(), "/users/{id}");
        }
    }

    #[test]
    fn test_first_registered_wins_when_overlap_allowed() {
        let settings = Settings {
            reject_overlapping_routes: false,
            ..Settings::default()
        };
        let mut builder = RouteTableBuilder::new();
        builder
            .get("/users/{id}", noop_handler())
            .get("/users/me", noop_handler());
        let table = builder.build(&settings).unwrap();

        let resolved = resolve(&table, &request(Method::GET, "/users/me")).unwrap();
        assert_eq!(resolved.route.route(), "/users/{id}");
        assert_eq!(resolved.param("id"), Some("me"));
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::new();
        let err = resolve(&table, &request(Method::GET, "/")).unwrap_err();
        assert_eq!(err.stage(), Some(MatchStage::NoPathMatch));
    }

    #[test]
    fn test_root_route() {
        let mut builder = RouteTableBuilder::new();
        builder.get("/", noop_handler());
        let table = builder.build(&Settings::default()).unwrap();
        assert!(resolve(&table, &request(Method::GET, "/")).is_ok());
    }

    #[test]
    fn test_resolve_request_stores_params() {
        let table = users_table();
        let mut request = request(Method::PUT, "/users/5");
        let route = resolve_request(&table, &mut request).unwrap();
        assert_eq!(route.route(), "/users/{id}");
        assert_eq!(request.path_param("id"), Some("5"));
    }

    #[test]
    fn test_resolve_request_failure_leaves_request_untouched() {
        let table = users_table();
        let mut request = request(Method::GET, "/nowhere");
        assert!(resolve_request(&table, &mut request).is_err());
        assert!(request.path_params().is_empty());
    }

    #[test]
    fn test_table_is_shareable_across_threads() {
        let table = Arc::new(users_table());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    let path = format!("/users/{i}");
                    let resolved = resolve(&table, &request(Method::GET, &path)).unwrap();
                    resolved.params["id"].clone()
                })
            })
            .collect();
        let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids, ["0", "1", "2", "3"]);
    }
}

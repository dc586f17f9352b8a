//! Route registration.
//!
//! A [`RouteTable`] is built once, during configuration, and is read-only
//! afterwards. All validation happens here so that resolution can assume a
//! well-formed table: malformed templates, duplicate registrations, and (by
//! default) overlapping templates are rejected at insert time.

use std::fmt;
use std::sync::Arc;

use http::Method;
use routekit_core::{RouteError, RouteResult, Settings};

use crate::request::RouteRequest;
use crate::response::RouteResponse;
use crate::BoxFuture;

use super::corrector::PathCorrector;
use super::template::PathTemplate;

/// The type for route handler functions.
///
/// A handler receives the request (with its path parameters filled in) and
/// the response sink, and resolves to the filled-in sink. It is wrapped in an
/// `Arc` so that it can be shared across threads.
pub type RouteHandler = Arc<dyn Fn(RouteRequest, RouteResponse) -> BoxFuture + Send + Sync>;

/// A registered `(method, path template, handler)` triple.
///
/// The template is parsed once, in [`RouteTemplate::new`], and never mutated.
pub struct RouteTemplate {
    method: Method,
    template: PathTemplate,
    name: Option<String>,
    handler: RouteHandler,
}

impl fmt::Debug for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTemplate")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl RouteTemplate {
    /// Creates a route, parsing its template.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidTemplate`] if the template is malformed.
    pub fn new(method: Method, route: &str, handler: RouteHandler) -> RouteResult<Self> {
        Ok(Self {
            method,
            template: PathTemplate::parse(route)?,
            name: None,
            handler,
        })
    }

    /// Attaches a name, used only in diagnostics.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the parsed path template.
    pub const fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Returns the template string as registered.
    pub fn route(&self) -> &str {
        self.template.as_str()
    }

    /// Returns the route name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the handler.
    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    /// Invokes the handler with the request and the response sink.
    pub fn execute(&self, request: RouteRequest, response: RouteResponse) -> BoxFuture {
        (self.handler)(request, response)
    }
}

/// The set of registered routes.
///
/// Unique by `(method, template shape)`: `/users/{id}` and `/users/{uid}`
/// registered for the same method are duplicates. With overlap rejection
/// enabled (the default), two routes of the same method whose templates can
/// match the same concrete path are also rejected, which makes resolution
/// independent of registration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Arc<RouteTemplate>>,
    reject_overlapping: bool,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Creates an empty table that rejects overlapping templates.
    pub const fn new() -> Self {
        Self {
            routes: Vec::new(),
            reject_overlapping: true,
        }
    }

    /// Creates an empty table configured from settings.
    pub const fn from_settings(settings: &Settings) -> Self {
        Self {
            routes: Vec::new(),
            reject_overlapping: settings.reject_overlapping_routes,
        }
    }

    /// Returns `true` if overlapping templates are rejected.
    pub const fn rejects_overlapping(&self) -> bool {
        self.reject_overlapping
    }

    /// Registers a route.
    ///
    /// # Errors
    ///
    /// - [`RouteError::DuplicateRoute`] if a route with the same method and
    ///   template shape is already registered.
    /// - [`RouteError::AmbiguousRoute`] if overlap rejection is enabled and a
    ///   route with the same method has an overlapping template.
    pub fn insert(&mut self, route: RouteTemplate) -> RouteResult<()> {
        for existing in self.routes.iter().filter(|r| r.method() == route.method()) {
            if existing.template().same_shape(route.template()) {
                return Err(RouteError::DuplicateRoute {
                    method: route.method().to_string(),
                    template: route.route().to_string(),
                });
            }
            if self.reject_overlapping && existing.template().overlaps(route.template()) {
                return Err(RouteError::AmbiguousRoute {
                    method: route.method().to_string(),
                    first: existing.route().to_string(),
                    second: route.route().to_string(),
                });
            }
        }

        tracing::debug!(method = %route.method(), template = route.route(), "registered route");
        self.routes.push(Arc::new(route));
        Ok(())
    }

    /// Returns the registered routes, in registration order.
    pub fn routes(&self) -> &[Arc<RouteTemplate>] {
        &self.routes
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

struct PendingRoute {
    method: Method,
    route: String,
    name: Option<String>,
    handler: RouteHandler,
}

/// Collects route registrations and validates them all at once.
///
/// Template parsing and table validation are deferred to
/// [`build`](RouteTableBuilder::build), so registrations can be chained
/// without intermediate error handling.
///
/// A builder created with [`with_prefix`](RouteTableBuilder::with_prefix)
/// mounts every route it registers under that prefix.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use routekit_core::Settings;
/// use routekit_http::routing::table::RouteTableBuilder;
/// use routekit_http::{RouteRequest, RouteResponse};
///
/// let ok = Arc::new(|_req: RouteRequest, mut resp: RouteResponse| -> routekit_http::BoxFuture {
///     Box::pin(async move {
///         resp.status(http::StatusCode::OK);
///         resp
///     })
/// });
///
/// let mut builder = RouteTableBuilder::new();
/// builder.get("/users", ok.clone()).get("/users/{id}", ok);
/// let table = builder.build(&Settings::default()).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Default)]
pub struct RouteTableBuilder {
    prefix: Option<String>,
    pending: Vec<PendingRoute>,
}

impl fmt::Debug for RouteTableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.pending.iter().map(|p| format!("{} {}", p.method, p.route)))
            .finish()
    }
}

impl RouteTableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder that mounts every route under `prefix`.
    ///
    /// Each registered template becomes
    /// `PathCorrector::apply(prefix, template)`. Trailing slashes of the
    /// prefix are removed first, so `"/"` and `""` mount nothing.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: PathCorrector::correct(Some(prefix)),
            pending: Vec::new(),
        }
    }

    /// Returns the mount prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Registers a route for an arbitrary method.
    pub fn add(&mut self, method: Method, route: &str, handler: RouteHandler) -> &mut Self {
        self.pending.push(PendingRoute {
            method,
            route: PathCorrector::apply(self.prefix.as_deref(), Some(route)),
            name: None,
            handler,
        });
        self
    }

    /// Registers a named route for an arbitrary method.
    pub fn add_named(
        &mut self,
        method: Method,
        route: &str,
        name: &str,
        handler: RouteHandler,
    ) -> &mut Self {
        self.add(method, route, handler);
        if let Some(last) = self.pending.last_mut() {
            last.name = Some(name.to_string());
        }
        self
    }

    /// Registers a `GET` route.
    pub fn get(&mut self, route: &str, handler: RouteHandler) -> &mut Self {
        self.add(Method::GET, route, handler)
    }

    /// Registers a `POST` route.
    pub fn post(&mut self, route: &str, handler: RouteHandler) -> &mut Self {
        self.add(Method::POST, route, handler)
    }

    /// Registers a `PUT` route.
    pub fn put(&mut self, route: &str, handler: RouteHandler) -> &mut Self {
        self.add(Method::PUT, route, handler)
    }

    /// Registers a `DELETE` route.
    pub fn delete(&mut self, route: &str, handler: RouteHandler) -> &mut Self {
        self.add(Method::DELETE, route, handler)
    }

    /// Registers a `PATCH` route.
    pub fn patch(&mut self, route: &str, handler: RouteHandler) -> &mut Self {
        self.add(Method::PATCH, route, handler)
    }

    /// Returns the number of pending registrations.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Parses every template and builds the table.
    ///
    /// # Errors
    ///
    /// Returns the first registration error, see [`RouteTemplate::new`] and
    /// [`RouteTable::insert`].
    pub fn build(self, settings: &Settings) -> RouteResult<RouteTable> {
        let mut table = RouteTable::from_settings(settings);
        for pending in self.pending {
            let mut route = RouteTemplate::new(pending.method, &pending.route, pending.handler)?;
            if let Some(name) = pending.name {
                route = route.with_name(name);
            }
            table.insert(route)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use http::StatusCode;

    use super::*;

    pub(crate) fn noop_handler() -> RouteHandler {
        Arc::new(|_req: RouteRequest, resp: RouteResponse| -> BoxFuture {
            Box::pin(async move { resp })
        })
    }

    pub(crate) fn status_handler(status: StatusCode) -> RouteHandler {
        Arc::new(move |_req: RouteRequest, mut resp: RouteResponse| -> BoxFuture {
            Box::pin(async move {
                resp.status(status);
                resp
            })
        })
    }

    #[test]
    fn test_route_template_accessors() {
        let route = RouteTemplate::new(Method::PUT, "/users/{id}", noop_handler())
            .unwrap()
            .with_name("user-update");
        assert_eq!(route.method(), &Method::PUT);
        assert_eq!(route.route(), "/users/{id}");
        assert_eq!(route.name(), Some("user-update"));
        assert_eq!(route.template().len(), 2);
    }

    #[test]
    fn test_route_template_invalid() {
        let result = RouteTemplate::new(Method::GET, "/users/{id", noop_handler());
        assert!(matches!(result, Err(RouteError::InvalidTemplate(_))));
    }

    #[test]
    fn test_route_template_debug() {
        let route = RouteTemplate::new(Method::GET, "/ping", noop_handler()).unwrap();
        let debug = format!("{route:?}");
        assert!(debug.contains("/ping"));
        assert!(debug.contains("GET"));
    }

    #[tokio::test]
    async fn test_route_template_execute() {
        let route =
            RouteTemplate::new(Method::GET, "/ping", status_handler(StatusCode::NO_CONTENT))
                .unwrap();
        let response = route
            .execute(RouteRequest::default(), RouteResponse::new())
            .await;
        assert_eq!(response.status_code(), Some(StatusCode::NO_CONTENT));
    }

    #[test]
    fn test_insert_distinct_routes() {
        let mut table = RouteTable::new();
        table
            .insert(RouteTemplate::new(Method::GET, "/users", noop_handler()).unwrap())
            .unwrap();
        table
            .insert(RouteTemplate::new(Method::POST, "/users", noop_handler()).unwrap())
            .unwrap();
        table
            .insert(RouteTemplate::new(Method::GET, "/users/{id}", noop_handler()).unwrap())
            .unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut table = RouteTable::new();
        table
            .insert(RouteTemplate::new(Method::GET, "/users/{id}", noop_handler()).unwrap())
            .unwrap();
        let err = table
            .insert(RouteTemplate::new(Method::GET, "/users/{userId}", noop_handler()).unwrap())
            .unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoute { .. }));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_overlap_rejected_by_default() {
        let mut table = RouteTable::new();
        table
            .insert(RouteTemplate::new(Method::GET, "/users/{id}", noop_handler()).unwrap())
            .unwrap();
        let err = table
            .insert(RouteTemplate::new(Method::GET, "/users/me", noop_handler()).unwrap())
            .unwrap_err();
        match err {
            RouteError::AmbiguousRoute { first, second, .. } => {
                assert_eq!(first, "/users/{id}");
                assert_eq!(second, "/users/me");
            }
            other => panic!("expected AmbiguousRoute, got {other:?}"),
        }
    }

    #[test]
    fn test_overlap_with_different_method_is_allowed() {
        let mut table = RouteTable::new();
        table
            .insert(RouteTemplate::new(Method::GET, "/users/{id}", noop_handler()).unwrap())
            .unwrap();
        table
            .insert(RouteTemplate::new(Method::DELETE, "/users/me", noop_handler()).unwrap())
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_overlap_allowed_when_disabled() {
        let settings = Settings {
            reject_overlapping_routes: false,
            ..Settings::default()
        };
        let mut table = RouteTable::from_settings(&settings);
        assert!(!table.rejects_overlapping());
        table
            .insert(RouteTemplate::new(Method::GET, "/users/{id}", noop_handler()).unwrap())
            .unwrap();
        table
            .insert(RouteTemplate::new(Method::GET, "/users/me", noop_handler()).unwrap())
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_builder_builds_table() {
        let mut builder = RouteTableBuilder::new();
        builder
            .get("/ping", noop_handler())
            .post("/ping", noop_handler())
            .put("/items/{id}", noop_handler())
            .delete("/items/{id}", noop_handler())
            .patch("/items/{id}", noop_handler())
            .add_named(Method::OPTIONS, "/items", "item-options", noop_handler());
        assert_eq!(builder.len(), 6);

        let table = builder.build(&Settings::default()).unwrap();
        assert_eq!(table.len(), 6);
        let named = table
            .routes()
            .iter()
            .find(|r| *r.method() == Method::OPTIONS)
            .unwrap();
        assert_eq!(named.name(), Some("item-options"));
    }

    #[test]
    fn test_builder_reports_invalid_template() {
        let mut builder = RouteTableBuilder::new();
        builder.get("/ok", noop_handler()).get("/bad/{", noop_handler());
        let err = builder.build(&Settings::default()).unwrap_err();
        assert!(matches!(err, RouteError::InvalidTemplate(_)));
    }

    #[test]
    fn test_builder_with_prefix_mounts_routes() {
        let mut builder = RouteTableBuilder::with_prefix("/v1/");
        assert_eq!(builder.prefix(), Some("/v1"));
        builder
            .get("/status", noop_handler())
            .get("/", noop_handler())
            .delete("/items/{id}", noop_handler());

        let table = builder.build(&Settings::default()).unwrap();
        let routes: Vec<&str> = table.routes().iter().map(|r| r.route()).collect();
        assert_eq!(routes, ["/v1/status", "/v1/", "/v1/items/{id}"]);
        assert_eq!(table.routes()[1].template().len(), 1);
    }

    #[test]
    fn test_builder_with_root_prefix_mounts_nothing() {
        let mut builder = RouteTableBuilder::with_prefix("/");
        assert!(builder.prefix().is_none());
        builder.get("/status", noop_handler());
        let table = builder.build(&Settings::default()).unwrap();
        assert_eq!(table.routes()[0].route(), "/status");
    }

    #[test]
    fn test_builder_debug_lists_routes() {
        let mut builder = RouteTableBuilder::new();
        assert!(builder.is_empty());
        builder.get("/ping", noop_handler());
        let debug = format!("{builder:?}");
        assert!(debug.contains("GET /ping"));
    }
}

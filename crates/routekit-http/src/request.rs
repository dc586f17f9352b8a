//! The per-request descriptor.
//!
//! [`RouteRequest`] is created for one request, mutated in place while its
//! path and path parameters are filled in, and discarded after the handler
//! has run. It is never shared between requests.

use std::collections::HashMap;

use http::{HeaderMap, Method};

use crate::entity::Entity;
use crate::routing::corrector;

/// A request as seen by the route resolver.
///
/// The path segments are derived from the path every time the path is set,
/// so they are always consistent with it. Path parameters are empty until a
/// route has been resolved.
///
/// # Examples
///
/// ```
/// use routekit_http::RouteRequest;
///
/// let request = RouteRequest::builder()
///     .method(http::Method::GET)
///     .path("/users/42/orders/7")
///     .query("expand", "items")
///     .build();
///
/// assert_eq!(request.method(), &http::Method::GET);
/// assert_eq!(request.path_parts(), ["users", "42", "orders", "7"]);
/// assert_eq!(request.query_param("expand"), Some("items"));
/// assert!(request.path_params().is_empty());
/// ```
#[derive(Debug)]
pub struct RouteRequest {
    method: Method,
    path: String,
    path_parts: Vec<String>,
    path_params: HashMap<String, String>,
    query_params: HashMap<String, String>,
    headers: HeaderMap,
    entity: Option<Entity>,
}

impl Default for RouteRequest {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RouteRequest {
    /// Creates a new [`RouteRequestBuilder`].
    pub fn builder() -> RouteRequestBuilder {
        RouteRequestBuilder::default()
    }

    /// Returns the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Sets the HTTP method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Returns the concrete request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sets the request path and re-derives its segments.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.path_parts = corrector::split_segments(&self.path);
    }

    /// Returns the path segments, in order.
    pub fn path_parts(&self) -> &[String] {
        &self.path_parts
    }

    /// Returns the captured path parameters.
    pub const fn path_params(&self) -> &HashMap<String, String> {
        &self.path_params
    }

    /// Returns a single captured path parameter.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// Replaces the captured path parameters.
    pub fn set_path_params(&mut self, params: HashMap<String, String>) {
        self.path_params = params;
    }

    /// Returns the query parameters.
    pub const fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Returns a single query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    /// Returns the request headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the request entity, if any.
    pub const fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// Sets the request entity.
    pub fn set_entity(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    /// Removes and returns the request entity.
    pub fn take_entity(&mut self) -> Option<Entity> {
        self.entity.take()
    }
}

/// A builder for constructing [`RouteRequest`] instances.
///
/// Defaults to `GET /` with no headers, query parameters, or entity.
#[derive(Debug)]
pub struct RouteRequestBuilder {
    method: Method,
    path: String,
    query_params: HashMap<String, String>,
    headers: HeaderMap,
    entity: Option<Entity>,
}

impl Default for RouteRequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_params: HashMap::new(),
            headers: HeaderMap::new(),
            entity: None,
        }
    }
}

impl RouteRequestBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.query_params.insert(name.to_string(), value.to_string());
        self
    }

    /// Adds a header. Invalid header names or values are ignored.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            http::header::HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the request entity.
    #[must_use]
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Builds the [`RouteRequest`].
    pub fn build(self) -> RouteRequest {
        let path_parts = corrector::split_segments(&self.path);
        RouteRequest {
            method: self.method,
            path: self.path,
            path_parts,
            path_params: HashMap::new(),
            query_params: self.query_params,
            headers: self.headers,
            entity: self.entity,
        }
    }
}

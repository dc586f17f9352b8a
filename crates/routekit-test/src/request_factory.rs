//! Request factory for building [`RouteRequest`] objects in tests.
//!
//! [`RequestFactory`] carries defaults (headers, query parameters) that are
//! applied to every request it builds. The method and path it sets are only
//! a starting point when the request is passed to
//! [`ControllerTest::call`](crate::harness::ControllerTest::call), which
//! overwrites both.
//!
//! ## Example
//!
//! ```
//! use routekit_test::request_factory::RequestFactory;
//!
//! let factory = RequestFactory::new().with_default_header("accept", "application/json");
//! let request = factory.get("/articles");
//! assert_eq!(request.method(), &http::Method::GET);
//! assert_eq!(request.path(), "/articles");
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use std::any::Any;
use std::collections::HashMap;

use http::Method;
use routekit_http::{Entity, RouteRequest, RouteRequestBuilder};

/// A factory for building [`RouteRequest`] objects with shared defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestFactory {
    default_headers: HashMap<String, String>,
    default_query: HashMap<String, String>,
}

impl RequestFactory {
    /// Creates a new request factory with no defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default header that will be included in all requests.
    #[must_use]
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Adds a default query parameter that will be included in all requests.
    #[must_use]
    pub fn with_default_query(mut self, name: &str, value: &str) -> Self {
        self.default_query
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Builds an empty request carrying only the defaults.
    ///
    /// Its method and path are `GET /`, to be replaced by the harness.
    pub fn empty(&self) -> RouteRequest {
        self.builder(Method::GET, "/").build()
    }

    /// Builds a request carrying the defaults and the given entity.
    pub fn with_entity<T: Any + Send + Sync>(&self, entity: T) -> RouteRequest {
        self.builder(Method::GET, "/")
            .entity(Entity::new(entity))
            .build()
    }

    /// Builds a GET request to the given path.
    pub fn get(&self, path: &str) -> RouteRequest {
        self.builder(Method::GET, path).build()
    }

    /// Builds a POST request with an entity.
    pub fn post<T: Any + Send + Sync>(&self, path: &str, entity: T) -> RouteRequest {
        self.builder(Method::POST, path)
            .entity(Entity::new(entity))
            .build()
    }

    /// Builds a PUT request with an entity.
    pub fn put<T: Any + Send + Sync>(&self, path: &str, entity: T) -> RouteRequest {
        self.builder(Method::PUT, path)
            .entity(Entity::new(entity))
            .build()
    }

    /// Builds a PATCH request with an entity.
    pub fn patch<T: Any + Send + Sync>(&self, path: &str, entity: T) -> RouteRequest {
        self.builder(Method::PATCH, path)
            .entity(Entity::new(entity))
            .build()
    }

    /// Builds a DELETE request to the given path.
    pub fn delete(&self, path: &str) -> RouteRequest {
        self.builder(Method::DELETE, path).build()
    }

    /// Builds a HEAD request to the given path.
    pub fn head(&self, path: &str) -> RouteRequest {
        self.builder(Method::HEAD, path).build()
    }

    /// Builds an OPTIONS request to the given path.
    pub fn options(&self, path: &str) -> RouteRequest {
        self.builder(Method::OPTIONS, path).build()
    }

    /// Returns a builder preloaded with the defaults.
    pub fn builder(&self, method: Method, path: &str) -> RouteRequestBuilder {
        let mut builder = RouteRequest::builder().method(method).path(path);

        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }

        for (name, value) in &self.default_query {
            builder = builder.query(name, value);
        }

        builder
    }
}

//! Controller configuration.
//!
//! A controller is a named set of routes, optionally mounted under a
//! controller path. Anything implementing [`ControllerConfiguration`] can be
//! handed to [`ControllerTest`](crate::harness::ControllerTest); [`Controller`]
//! is a ready-made implementation assembled with builder calls.

use std::fmt;

use http::Method;
use routekit_core::RouteResult;
use routekit_http::routing::{RouteHandler, RouteTableBuilder};

/// A source of routes.
///
/// Handlers and whatever they depend on are wired by construction: a
/// controller that needs a repository stores it in a field and captures a
/// clone of it in each handler closure.
pub trait ControllerConfiguration: Send + Sync {
    /// Registers this controller's routes.
    ///
    /// # Errors
    ///
    /// Implementations may fail if they cannot produce their routes. Template
    /// and duplicate errors are reported later, when the table is built.
    fn configure(&self, routes: &mut RouteTableBuilder) -> RouteResult<()>;

    /// The path under which this controller is mounted, if any.
    ///
    /// It is joined in front of every route template the controller
    /// registers; `"/users"` with a route `"/{id}"` serves `"/users/{id}"`.
    fn controller_path(&self) -> Option<&str> {
        None
    }
}

/// A controller assembled from builder calls.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use routekit_http::{RouteRequest, RouteResponse};
/// use routekit_test::controller::{Controller, ControllerConfiguration};
///
/// let list = Arc::new(|_req: RouteRequest, resp: RouteResponse| -> routekit_http::BoxFuture {
///     Box::pin(async move { resp })
/// });
///
/// let controller = Controller::new()
///     .with_path("/api")
///     .get("/users", list.clone())
///     .post("/users", list);
///
/// assert_eq!(controller.controller_path(), Some("/api"));
/// assert_eq!(controller.len(), 2);
/// ```
#[derive(Default)]
pub struct Controller {
    path: Option<String>,
    routes: Vec<(Method, String, RouteHandler)>,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("path", &self.path)
            .field(
                "routes",
                &self
                    .routes
                    .iter()
                    .map(|(method, route, _)| format!("{method} {route}"))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Controller {
    /// Creates an empty controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the controller path.
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Registers a route for an arbitrary method.
    #[must_use]
    pub fn route(mut self, method: Method, route: &str, handler: RouteHandler) -> Self {
        self.routes.push((method, route.to_string(), handler));
        self
    }

    /// Registers a `GET` route.
    #[must_use]
    pub fn get(self, route: &str, handler: RouteHandler) -> Self {
        self.route(Method::GET, route, handler)
    }

    /// Registers a `POST` route.
    #[must_use]
    pub fn post(self, route: &str, handler: RouteHandler) -> Self {
        self.route(Method::POST, route, handler)
    }

    /// Registers a `PUT` route.
    #[must_use]
    pub fn put(self, route: &str, handler: RouteHandler) -> Self {
        self.route(Method::PUT, route, handler)
    }

    /// Registers a `DELETE` route.
    #[must_use]
    pub fn delete(self, route: &str, handler: RouteHandler) -> Self {
        self.route(Method::DELETE, route, handler)
    }

    /// Registers a `PATCH` route.
    #[must_use]
    pub fn patch(self, route: &str, handler: RouteHandler) -> Self {
        self.route(Method::PATCH, route, handler)
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

impl ControllerConfiguration for Controller {
    fn configure(&self, routes: &mut RouteTableBuilder) -> RouteResult<()> {
        for (method, route, handler) in &self.routes {
            routes.add(method.clone(), route, handler.clone());
        }
        Ok(())
    }

    fn controller_path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

//! The controller test harness.
//!
//! [`ControllerTest`] drives a single controller through the same path
//! joining and two-stage resolution a transport would use, then runs the
//! matched handler against a [`RouteResponse`] sink. No network is involved.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use routekit_http::{RouteRequest, RouteResponse};
//! use routekit_test::controller::Controller;
//! use routekit_test::harness::ControllerTest;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let show = Arc::new(|req: RouteRequest, mut resp: RouteResponse| -> routekit_http::BoxFuture {
//!     let id = req.path_param("id").unwrap_or_default().to_string();
//!     Box::pin(async move {
//!         resp.status(http::StatusCode::OK).header("x-user", &id);
//!         resp
//!     })
//! });
//!
//! let mut test = ControllerTest::new();
//! test.set_controller(Controller::new().with_path("/api").get("/users/{id}", show));
//! test.set_global_path("/api");
//!
//! let response = test
//!     .get_path("/users/42", RouteRequest::default(), RouteResponse::new())
//!     .await
//!     .unwrap();
//! assert_eq!(response.header_value("x-user"), Some("42"));
//! # }
//! ```

use std::fmt;

use http::Method;
use routekit_core::{RouteError, RouteResult, Settings};
use routekit_http::routing::{
    resolve, resolve_request, PathCorrector, ResolvedRoute, RouteTable, RouteTableBuilder,
};
use routekit_http::{RouteRequest, RouteResponse};

use crate::controller::ControllerConfiguration;

const MISSING_CONTROLLER: &str =
    "There is no defined any tested controller. Use 'set_controller' before calling the controller.";

/// Drives a controller's routes in tests.
///
/// The controller's [`controller_path`](ControllerConfiguration::controller_path)
/// is mounted onto each of its route templates when the table is built. The
/// global path (from settings or via [`set_global_path`](Self::set_global_path))
/// is the only prefix joined in front of call paths.
///
/// The route table is built lazily on the first call and rebuilt after the
/// controller changes.
pub struct ControllerTest {
    settings: Settings,
    controller: Option<Box<dyn ControllerConfiguration>>,
    global_path: Option<String>,
    table: Option<RouteTable>,
}

impl fmt::Debug for ControllerTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerTest")
            .field("global_path", &self.global_path)
            .field("has_controller", &self.controller.is_some())
            .field("routes", &self.table.as_ref().map(RouteTable::len))
            .finish_non_exhaustive()
    }
}

impl Default for ControllerTest {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerTest {
    /// Creates a harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Creates a harness with the given settings.
    ///
    /// `settings.global_path`, if set, becomes the initial global path.
    pub fn with_settings(settings: Settings) -> Self {
        let global_path = PathCorrector::correct(settings.global_path.as_deref());
        Self {
            settings,
            controller: None,
            global_path,
            table: None,
        }
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sets the controller under test.
    pub fn set_controller(&mut self, controller: impl ControllerConfiguration + 'static) {
        self.controller = Some(Box::new(controller));
        self.table = None;
    }

    /// Sets the global path, removing trailing slashes.
    ///
    /// `"/"` and `""` clear it.
    pub fn set_global_path(&mut self, global_path: &str) {
        self.global_path = PathCorrector::correct(Some(global_path));
    }

    /// Returns the prefix joined in front of every call path.
    pub fn global_path(&self) -> Option<&str> {
        self.global_path.as_deref()
    }

    /// Builds the route table from the controller.
    ///
    /// Every template is mounted under the controller path, if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingController`] if no controller was set, or
    /// any error raised while the controller's routes are registered.
    pub fn initialize(&mut self) -> RouteResult<&RouteTable> {
        let controller = self
            .controller
            .as_ref()
            .ok_or_else(|| RouteError::MissingController(MISSING_CONTROLLER.to_string()))?;

        let mut builder = controller
            .controller_path()
            .map_or_else(RouteTableBuilder::new, RouteTableBuilder::with_prefix);
        controller.configure(&mut builder)?;
        let table = builder.build(&self.settings)?;
        tracing::debug!(routes = table.len(), "controller initialized");

        let table: &RouteTable = self.table.insert(table);
        Ok(table)
    }

    fn ensure_initialized(&mut self) -> RouteResult<()> {
        if self.table.is_none() {
            self.initialize()?;
        }
        Ok(())
    }

    fn table(&self) -> RouteResult<&RouteTable> {
        self.table
            .as_ref()
            .ok_or_else(|| RouteError::MissingController(MISSING_CONTROLLER.to_string()))
    }

    /// Resolves a request against the controller's routes, without running
    /// the handler.
    ///
    /// The request path is used as given; no prefix is applied.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingController`] if no controller was set,
    /// or the resolution failure.
    pub fn resolve_route(&mut self, request: &RouteRequest) -> RouteResult<ResolvedRoute> {
        self.ensure_initialized()?;
        resolve(self.table()?, request)
    }

    /// Issues a call: builds the request path, resolves the route, stores
    /// the path parameters on the request, and runs the handler.
    ///
    /// The request path becomes
    /// `PathCorrector::apply(global_path, PathCorrector::correct(path))`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingController`] if no controller was set,
    /// [`RouteError::NoPathMatch`] or [`RouteError::MethodMismatch`] if the
    /// call does not resolve, or any registration error of the controller.
    pub async fn call(
        &mut self,
        method: Method,
        path: Option<&str>,
        mut request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.ensure_initialized()?;

        let path = PathCorrector::correct(path);
        let full_path = PathCorrector::apply(self.global_path(), path.as_deref());
        tracing::debug!(%method, path = %full_path, "controller call");

        request.set_method(method);
        request.set_path(full_path);
        let route = resolve_request(self.table()?, &mut request)?;

        Ok(route.execute(request, response).await)
    }

    /// Issues a `GET` to the global path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get(
        &mut self,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::GET, None, request, response).await
    }

    /// Issues a `GET` to the given path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_path(
        &mut self,
        path: &str,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::GET, Some(path), request, response).await
    }

    /// Issues a `POST` to the global path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn post(
        &mut self,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::POST, None, request, response).await
    }

    /// Issues a `POST` to the given path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn post_path(
        &mut self,
        path: &str,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::POST, Some(path), request, response).await
    }

    /// Issues a `PUT` to the global path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn put(
        &mut self,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::PUT, None, request, response).await
    }

    /// Issues a `PUT` to the given path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn put_path(
        &mut self,
        path: &str,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::PUT, Some(path), request, response).await
    }

    /// Issues a `DELETE` to the global path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn delete(
        &mut self,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::DELETE, None, request, response).await
    }

    /// Issues a `DELETE` to the given path.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn delete_path(
        &mut self,
        path: &str,
        request: RouteRequest,
        response: RouteResponse,
    ) -> RouteResult<RouteResponse> {
        self.call(Method::DELETE, Some(path), request, response).await
    }
}

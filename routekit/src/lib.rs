//! # routekit
//!
//! A route resolution engine. Route templates with named path parameters are
//! registered once into a read-only table; each request is resolved by path
//! first and by HTTP method second, so that "no such path" and "path exists,
//! wrong method" stay distinguishable.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `routekit` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ```
//! use std::sync::Arc;
//! use routekit::prelude::*;
//!
//! let ok = Arc::new(|_req: RouteRequest, resp: RouteResponse| -> routekit::http::BoxFuture {
//!     Box::pin(async move { resp })
//! });
//! let mut builder = RouteTableBuilder::new();
//! builder.get("/ping", ok);
//! let table = builder.build(&Settings::default()).unwrap();
//!
//! let request = RouteRequest::builder().method(Method::POST).path("/ping").build();
//! let err = resolve(&table, &request).unwrap_err();
//! assert_eq!(err.stage(), Some(MatchStage::PathMatchedMethodMismatch));
//! ```

/// Error types, settings, settings loader, and logging.
pub use routekit_core as core;

/// Request and response types and the routing kernel.
#[cfg(feature = "http")]
pub use routekit_http as http;

/// Controller harness, request factory, and assertions.
#[cfg(feature = "testing")]
pub use routekit_test as test;

/// The `http` crate, for `Method`, `StatusCode`, and header types.
pub use ::http as http_types;

pub use tracing;

/// Common imports.
pub mod prelude {
    pub use crate::core::{MatchStage, RouteError, RouteResult, Settings};
    pub use ::http::{Method, StatusCode};

    #[cfg(feature = "http")]
    pub use crate::http::routing::{
        resolve, resolve_request, PathCorrector, ResolvedRoute, RouteHandler, RouteTable,
        RouteTableBuilder, RouteTemplate,
    };
    #[cfg(feature = "http")]
    pub use crate::http::{Entity, RouteRequest, RouteResponse};

    #[cfg(feature = "testing")]
    pub use crate::test::{Controller, ControllerConfiguration, ControllerTest, RequestFactory};
}

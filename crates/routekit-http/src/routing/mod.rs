//! Route resolution.
//!
//! Leaves first:
//!
//! - [`corrector`]: path canonicalization and prefix joining
//! - [`template`]: parsed path templates
//! - [`comparator`] and [`matcher`]: the path and method predicates
//! - [`params`]: path parameter extraction
//! - [`table`]: route registration and validation
//! - [`resolver`]: the two-stage resolution pipeline
//!
//! ```
//! use std::sync::Arc;
//! use routekit_core::Settings;
//! use routekit_http::routing::{resolve, RouteTableBuilder};
//! use routekit_http::{RouteRequest, RouteResponse};
//!
//! let show = Arc::new(|req: RouteRequest, mut resp: RouteResponse| -> routekit_http::BoxFuture {
//!     let id = req.path_param("id").unwrap_or_default().to_string();
//!     Box::pin(async move {
//!         resp.header("x-user", &id);
//!         resp
//!     })
//! });
//!
//! let mut builder = RouteTableBuilder::new();
//! builder.get("/users/{id}", show);
//! let table = builder.build(&Settings::default()).unwrap();
//!
//! let request = RouteRequest::builder().path("/users/42").build();
//! let resolved = resolve(&table, &request).unwrap();
//! assert_eq!(resolved.params["id"], "42");
//! ```

pub mod comparator;
pub mod corrector;
pub mod matcher;
pub mod params;
pub mod resolver;
pub mod table;
pub mod template;

pub use comparator::PathComparator;
pub use corrector::PathCorrector;
pub use matcher::RequestMatcher;
pub use params::extract_params;
pub use resolver::{resolve, resolve_request, ResolvedRoute};
pub use table::{RouteHandler, RouteTable, RouteTableBuilder, RouteTemplate};
pub use template::{PathTemplate, Segment};

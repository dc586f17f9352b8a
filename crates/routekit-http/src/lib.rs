//! # routekit-http
//!
//! Request and response types and the route resolution kernel for routekit.
//!
//! A [`routing::RouteTable`] is built once from route templates and is then
//! shared read-only. Each incoming [`RouteRequest`] is resolved against it by
//! [`routing::resolver::resolve`], which filters by path first and by HTTP
//! method second so that the two kinds of failure stay distinguishable.

use std::future::Future;
use std::pin::Pin;

pub mod entity;
pub mod request;
pub mod response;
pub mod routing;

pub use entity::Entity;
pub use request::{RouteRequest, RouteRequestBuilder};
pub use response::RouteResponse;

/// The future returned by a route handler, resolving to the response sink.
pub type BoxFuture = Pin<Box<dyn Future<Output = RouteResponse> + Send>>;

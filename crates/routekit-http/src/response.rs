//! The response sink handed to route handlers.
//!
//! [`RouteResponse`] collects whatever a handler decides to send back: a
//! status, headers, and an optional [`Entity`]. Nothing is written to a wire.

use http::{HeaderMap, HeaderValue, StatusCode};

use routekit_core::RouteError;

use crate::entity::Entity;

/// A response sink, filled in by a route handler.
///
/// The status stays `None` until a handler sets one, which lets tests tell
/// "handler did not set a status" apart from an explicit `200 OK`.
///
/// # Examples
///
/// ```
/// use routekit_http::{Entity, RouteResponse};
///
/// let mut response = RouteResponse::new();
/// response
///     .status(http::StatusCode::CREATED)
///     .header("location", "/users/42");
/// response.set_entity(Entity::new(42_u64));
///
/// assert_eq!(response.status_code(), Some(http::StatusCode::CREATED));
/// assert_eq!(response.header_value("location"), Some("/users/42"));
/// ```
#[derive(Debug, Default)]
pub struct RouteResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    entity: Option<Entity>,
}

impl RouteResponse {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a resolution failure as a response.
    ///
    /// `NoPathMatch` becomes `404`; `MethodMismatch` becomes `405` with an
    /// `Allow` header listing the methods that matched the path. Any other
    /// error becomes `500`. The error message is carried as a `String`
    /// entity.
    pub fn from_error(error: &RouteError) -> Self {
        let mut response = Self::new();
        let status = StatusCode::from_u16(error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        response.status(status);

        if let RouteError::MethodMismatch { allowed, .. } = error {
            if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
                response.headers.insert(http::header::ALLOW, value);
            }
        }

        response.set_entity(Entity::new(error.to_string()));
        response
    }

    /// Sets the status code.
    pub fn status(&mut self, status: StatusCode) -> &mut Self {
        self.status = Some(status);
        self
    }

    /// Returns the status code, if one was set.
    pub const fn status_code(&self) -> Option<StatusCode> {
        self.status
    }

    /// Sets a header. Invalid header names or values are ignored.
    pub fn header(&mut self, name: &str, value: &str) -> &mut Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Returns the response headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a mutable reference to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the response entity, if any.
    pub const fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// Sets the response entity.
    pub fn set_entity(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    /// Removes and returns the response entity.
    pub fn take_entity(&mut self) -> Option<Entity> {
        self.entity.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response_is_empty() {
        let response = RouteResponse::new();
        assert!(response.status_code().is_none());
        assert!(response.headers().is_empty());
        assert!(response.entity().is_none());
    }

    #[test]
    fn test_status_and_header_chain() {
        let mut response = RouteResponse::new();
        response.status(StatusCode::ACCEPTED).header("x-trace", "1");
        assert_eq!(response.status_code(), Some(StatusCode::ACCEPTED));
        assert_eq!(response.header_value("x-trace"), Some("1"));
    }

    #[test]
    fn test_invalid_header_is_ignored() {
        let mut response = RouteResponse::new();
        response.header("bad name", "x");
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_from_no_path_match() {
        let err = RouteError::NoPathMatch {
            path: "/pong".into(),
        };
        let response = RouteResponse::from_error(&err);
        assert_eq!(response.status_code(), Some(StatusCode::NOT_FOUND));
        assert!(response.header_value("allow").is_none());
        let message = response.entity().unwrap().downcast_ref::<String>().unwrap();
        assert!(message.contains("/pong"));
    }

    #[test]
    fn test_from_method_mismatch_sets_allow() {
        let err = RouteError::MethodMismatch {
            path: "/ping".into(),
            method: "POST".into(),
            allowed: vec!["GET".into(), "PUT".into()],
        };
        let response = RouteResponse::from_error(&err);
        assert_eq!(response.status_code(), Some(StatusCode::METHOD_NOT_ALLOWED));
        assert_eq!(response.header_value("allow"), Some("GET, PUT"));
    }

    #[test]
    fn test_from_configuration_error() {
        let err = RouteError::InvalidTemplate("{".into());
        let response = RouteResponse::from_error(&err);
        assert_eq!(
            response.status_code(),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}

//! Core error types for routekit.
//!
//! [`RouteError`] covers the two resolution failures produced by the routing
//! kernel, the configuration errors raised while a route table is being
//! registered, and the failures of the settings loader. Each variant maps to
//! an HTTP status code via [`RouteError::status_code`] so that a transport
//! layer can render it without inspecting the message.

use std::fmt;

use thiserror::Error;

/// The stage of the resolution pipeline at which a request failed to match.
///
/// Resolution filters by path first and by HTTP method second. The stage
/// tells the caller which of the two filters came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStage {
    /// No registered template structurally matches the request path.
    NoPathMatch,
    /// At least one template matches the path, but none accepts the method.
    PathMatchedMethodMismatch,
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPathMatch => f.write_str("no-path-match"),
            Self::PathMatchedMethodMismatch => f.write_str("path-matched-method-mismatch"),
        }
    }
}

/// The primary error type for routekit.
///
/// # Examples
///
/// ```
/// use routekit_core::{MatchStage, RouteError};
///
/// let err = RouteError::NoPathMatch { path: "/pong".to_string() };
/// assert_eq!(err.stage(), Some(MatchStage::NoPathMatch));
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.to_string(), "There is no route suitable for path [/pong]");
/// ```
#[derive(Error, Debug)]
pub enum RouteError {
    // ── Resolution ───────────────────────────────────────────────────

    /// No registered route template structurally matches the path.
    #[error("There is no route suitable for path [{path}]")]
    NoPathMatch {
        /// The canonical request path.
        path: String,
    },

    /// Some route matches the path, but none matches the HTTP method.
    #[error("There is no route suitable for path [{path}], method [{method}]")]
    MethodMismatch {
        /// The canonical request path.
        path: String,
        /// The request method.
        method: String,
        /// Methods of the routes that did match the path, sorted.
        allowed: Vec<String>,
    },

    // ── Registration ─────────────────────────────────────────────────

    /// A path template could not be parsed.
    #[error("Invalid route template: {0}")]
    InvalidTemplate(String),

    /// The same method and template shape were registered twice.
    #[error("Duplicate route: {method} {template}")]
    DuplicateRoute {
        /// The HTTP method of both registrations.
        method: String,
        /// The template of the second registration.
        template: String,
    },

    /// Two templates with the same method can match the same concrete path.
    #[error("Ambiguous routes for method {method}: [{first}] overlaps [{second}]")]
    AmbiguousRoute {
        /// The HTTP method of both registrations.
        method: String,
        /// The template registered first.
        first: String,
        /// The template that was rejected.
        second: String,
    },

    // ── Harness ──────────────────────────────────────────────────────

    /// A controller call was made before a controller was configured.
    #[error("{0}")]
    MissingController(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RouteError {
    /// Returns the resolution stage for the two "not found" variants.
    pub const fn stage(&self) -> Option<MatchStage> {
        match self {
            Self::NoPathMatch { .. } => Some(MatchStage::NoPathMatch),
            Self::MethodMismatch { .. } => Some(MatchStage::PathMatchedMethodMismatch),
            _ => None,
        }
    }

    /// Returns `true` if this error is a resolution failure.
    pub const fn is_not_found(&self) -> bool {
        self.stage().is_some()
    }

    /// Returns the HTTP status code associated with this error.
    ///
    /// - `NoPathMatch` -> 404
    /// - `MethodMismatch` -> 405
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NoPathMatch { .. } => 404,
            Self::MethodMismatch { .. } => 405,
            Self::InvalidTemplate(_)
            | Self::DuplicateRoute { .. }
            | Self::AmbiguousRoute { .. }
            | Self::MissingController(_)
            | Self::ConfigurationError(_)
            | Self::Io(_) => 500,
        }
    }
}

/// A convenience type alias for `Result<T, RouteError>`.
pub type RouteResult<T> = Result<T, RouteError>;

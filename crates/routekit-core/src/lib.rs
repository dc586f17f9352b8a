//! # routekit-core
//!
//! Core types shared by every routekit crate. This crate has no dependency on
//! the routing kernel and provides the foundation for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and result alias
//! - [`settings`] - Explicit configuration passed to the router and harness
//! - [`settings_loader`] - Settings loading from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{MatchStage, RouteError, RouteResult};
pub use settings::Settings;

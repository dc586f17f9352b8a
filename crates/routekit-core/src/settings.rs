//! Settings for routekit.
//!
//! [`Settings`] holds the configuration consumed by the route table builder,
//! the controller harness, and the logging setup. Settings are an explicit
//! value handed to whoever needs them; there is no global instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete set of routekit settings.
///
/// # Examples
///
/// ```
/// use routekit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert!(settings.reject_overlapping_routes);
/// assert!(settings.global_path.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Logging ──────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log level directive (e.g. "info", "routekit_http=trace").
    pub log_level: String,

    // ── Routing ──────────────────────────────────────────────────────

    /// Prefix joined in front of every path issued through the harness.
    pub global_path: Option<String>,
    /// Whether two templates with the same method that can match the same
    /// concrete path are rejected when the route table is built.
    ///
    /// When disabled, the route registered first wins.
    pub reject_overlapping_routes: bool,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            global_path: None,
            reject_overlapping_routes: true,
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns a copy of these settings with the given global path.
    #[must_use]
    pub fn with_global_path(mut self, global_path: impl Into<String>) -> Self {
        self.global_path = Some(global_path.into());
        self
    }
}

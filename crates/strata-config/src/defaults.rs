//! Fallback values for grid topology and logging settings.
//!
//! The `default_*` functions exist so serde field attributes can name them.

/// Port a grid server listens on when the configuration omits one.
pub const DEFAULT_PORT: u16 = 1247;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Default server port, shaped for `#[serde(default = ...)]`.
#[must_use]
pub const fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Host names the local server answers to when none are configured.
#[must_use]
pub fn default_local_host_names() -> Vec<String> {
    vec![String::from("localhost")]
}

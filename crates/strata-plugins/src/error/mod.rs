//! Domain errors raised by the structured-object layer.
//!
//! [`PluginError`] covers plugin resolution and plugin operation failures and
//! maps every variant onto the negative status code reported to clients.
//! [`ModelError`] covers values rejected while building requests.

use thiserror::Error;

use crate::format::StructFileType;

/// Status reported when a plugin fails without a more specific code.
pub const PLUGIN_ERROR: i32 = -1_000_000;

/// Status reported when no plugin is registered for a container format.
pub const PLUGIN_NOT_FOUND: i32 = -1_000_001;

/// Structured error returned by a format plugin.
///
/// The code is always negative. Plugins that hand in a non-negative code get
/// [`PLUGIN_ERROR`] instead so a failure can never be mistaken for a handle.
///
/// # Example
///
/// ```
/// use strata_plugins::error::{PluginFailure, PLUGIN_ERROR};
///
/// let failure = PluginFailure::new(-808_000, "no such directory in archive");
/// assert_eq!(failure.code(), -808_000);
/// assert_eq!(PluginFailure::new(3, "bogus").code(), PLUGIN_ERROR);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {code})")]
pub struct PluginFailure {
    code: i32,
    message: String,
}

impl PluginFailure {
    /// Builds a failure with the given status code and message.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code: if code < 0 { code } else { PLUGIN_ERROR },
            message: message.into(),
        }
    }

    /// Returns the negative status code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Returns the plugin-supplied message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Errors arising from plugin registration, resolution and invocation.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No plugin is registered for the container format.
    #[error("no plugin registered for container format '{format}'")]
    NotFound {
        /// Format that was looked up.
        format: StructFileType,
    },

    /// A plugin for the format is already registered.
    #[error("a plugin for container format '{format}' is already registered")]
    Duplicate {
        /// Format claimed twice.
        format: StructFileType,
    },

    /// The plugin ran and reported a failure.
    #[error("'{format}' plugin failed: {failure}")]
    Operation {
        /// Format whose plugin failed.
        format: StructFileType,
        /// Failure reported by the plugin.
        #[source]
        failure: PluginFailure,
    },
}

impl PluginError {
    /// Returns the negative status code for this error.
    ///
    /// Operation failures pass the plugin's own code through untouched.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => PLUGIN_NOT_FOUND,
            Self::Duplicate { .. } => PLUGIN_ERROR,
            Self::Operation { failure, .. } => failure.code(),
        }
    }
}

/// Errors raised while constructing request values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The container format identifier was blank or contained whitespace.
    #[error("invalid container format '{input}'")]
    InvalidFormat {
        /// Rejected input.
        input: String,
    },

    /// The resource hierarchy string was malformed.
    #[error("invalid resource hierarchy '{input}': {reason}")]
    InvalidHierarchy {
        /// Rejected input.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A directory handle must be non-negative.
    #[error("directory handle must be non-negative, got {value}")]
    NegativeHandle {
        /// Rejected value.
        value: i32,
    },
}

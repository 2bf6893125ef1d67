//! Plugin dispatch for structured objects.
//!
//! [`PluginDispatch`] picks the plugin for a [`StructuredObject`] using only
//! the format the object carries, then invokes the requested capability. It
//! is the single place where the dispatch layer meets format plugins.

use std::sync::Arc;

use tracing::debug;

use crate::error::PluginError;
use crate::object::StructuredObject;
use crate::plugin::StructFilePlugin;
use crate::registry::PluginRegistry;
use crate::session::DirectoryHandle;

/// Tracing target for plugin dispatch.
pub const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Resolves plugins from a shared registry and invokes them.
#[derive(Debug, Clone)]
pub struct PluginDispatch {
    registry: Arc<PluginRegistry>,
}

impl PluginDispatch {
    /// Creates a dispatcher over the given registry.
    #[must_use]
    pub const fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the registry plugins are resolved from.
    #[must_use]
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Selects the plugin for the object's container format.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::NotFound`] if no plugin serves the format.
    pub fn resolve(&self, object: &StructuredObject) -> Result<&dyn StructFilePlugin, PluginError> {
        self.registry
            .get(object.format())
            .map(|plugin| &**plugin)
            .ok_or_else(|| PluginError::NotFound {
                format: object.format().clone(),
            })
    }

    /// Opens the directory described by the object through its plugin.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::NotFound`] when no plugin serves the format and
    /// [`PluginError::Operation`] carrying the plugin's failure otherwise.
    pub fn open_directory(
        &self,
        object: &StructuredObject,
    ) -> Result<DirectoryHandle, PluginError> {
        let plugin = self.resolve(object)?;
        debug!(
            target: DISPATCH_TARGET,
            format = %object.format(),
            path = object.physical_path(),
            "invoking open-directory plugin"
        );
        plugin
            .open_directory(object)
            .map_err(|failure| PluginError::Operation {
                format: object.format().clone(),
                failure,
            })
    }
}

//! Plugin registry keyed by container format.
//!
//! The [`PluginRegistry`] stores one plugin per [`StructFileType`]. Adding a
//! container format means registering another plugin; nothing that looks
//! plugins up has to change. Duplicate registrations are rejected.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::PluginError;
use crate::format::StructFileType;
use crate::plugin::StructFilePlugin;

/// Registry of available format plugins.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<StructFileType, Arc<dyn StructFilePlugin>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under the format it reports.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Duplicate`] if the format already has a plugin.
    pub fn register(&mut self, plugin: Arc<dyn StructFilePlugin>) -> Result<(), PluginError> {
        let format = plugin.format().clone();
        if self.plugins.contains_key(&format) {
            return Err(PluginError::Duplicate { format });
        }
        self.plugins.insert(format, plugin);
        Ok(())
    }

    /// Looks up the plugin for a format.
    #[must_use]
    pub fn get(&self, format: &StructFileType) -> Option<&Arc<dyn StructFilePlugin>> {
        self.plugins.get(format)
    }

    /// Returns the registered formats in sorted order.
    #[must_use]
    pub fn formats(&self) -> Vec<&StructFileType> {
        let mut formats: Vec<_> = self.plugins.keys().collect();
        formats.sort();
        formats
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` when no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PluginRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

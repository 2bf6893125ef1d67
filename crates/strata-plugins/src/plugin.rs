//! Format-agnostic plugin interface.

use std::fmt;

use crate::error::PluginFailure;
use crate::format::StructFileType;
use crate::object::StructuredObject;
use crate::session::DirectoryHandle;

/// Behaviour required from a container-format plugin.
///
/// Implementations enumerate directories inside one container format. The
/// dispatch layer never names a concrete implementation; it looks plugins up
/// by [`StructFilePlugin::format`] in a
/// [`PluginRegistry`](crate::registry::PluginRegistry).
///
/// # Example
///
/// ```
/// use strata_plugins::{
///     DirectoryHandle, PluginFailure, StructFilePlugin, StructFileType, StructuredObject,
/// };
///
/// struct NullPlugin(StructFileType);
///
/// impl StructFilePlugin for NullPlugin {
///     fn format(&self) -> &StructFileType {
///         &self.0
///     }
///
///     fn open_directory(
///         &self,
///         object: &StructuredObject,
///     ) -> Result<DirectoryHandle, PluginFailure> {
///         object
///             .session()
///             .directory_handles()
///             .allocate()
///             .ok_or_else(|| PluginFailure::new(-1, "too many open directories"))
///     }
/// }
/// ```
pub trait StructFilePlugin: Send + Sync {
    /// Returns the container format this plugin services.
    fn format(&self) -> &StructFileType;

    /// Opens the directory at the object's physical path.
    ///
    /// A successful call returns a handle allocated from the object's
    /// session. A failed call must not leave a handle allocated.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginFailure`] carrying a negative status code.
    fn open_directory(&self, object: &StructuredObject) -> Result<DirectoryHandle, PluginFailure>;
}

impl fmt::Debug for dyn StructFilePlugin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "StructFilePlugin({})", self.format())
    }
}

//! Local execution of structured-file requests.

use tracing::warn;

use strata_plugins::{DirectoryHandle, PluginDispatch, StructFileRequest, StructuredObject};

use crate::errors::StructFileError;

/// Tracing target for local execution.
pub const LOCAL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::local");

/// Runs requests against the format plugins of this process.
///
/// The request is converted into a [`StructuredObject`] pinned to local use
/// so the plugin never re-resolves the hierarchy and forwards it again.
#[derive(Debug, Clone)]
pub struct LocalExecutor {
    dispatch: PluginDispatch,
}

impl LocalExecutor {
    /// Creates an executor over the given plugin dispatch.
    #[must_use]
    pub const fn new(dispatch: PluginDispatch) -> Self {
        Self { dispatch }
    }

    /// Returns the plugin dispatch used for execution.
    #[must_use]
    pub const fn dispatch(&self) -> &PluginDispatch {
        &self.dispatch
    }

    /// Opens the requested directory through the container's format plugin.
    ///
    /// # Errors
    ///
    /// Returns [`StructFileError::Plugin`] with the plugin's status when no
    /// plugin serves the format or the plugin fails.
    pub fn open_directory(
        &self,
        request: &StructFileRequest,
    ) -> Result<DirectoryHandle, StructFileError> {
        let object = StructuredObject::for_local_use(request);
        self.dispatch.open_directory(&object).map_err(|source| {
            warn!(
                target: LOCAL_TARGET,
                path = object.physical_path(),
                container = object.container_path(),
                code = source.code(),
                "failed on call to open directory for {}: {source}",
                object.physical_path()
            );
            StructFileError::Plugin {
                path: object.physical_path().to_owned(),
                source,
            }
        })
    }
}

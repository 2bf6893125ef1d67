//! Execution-time representation of a locally serviced request.

use std::sync::Arc;

use crate::address::HostAddress;
use crate::format::StructFileType;
use crate::hierarchy::ResourceHierarchy;
use crate::request::{StructFileRequest, SubFile};
use crate::session::SessionContext;

/// A request prepared for a format plugin on the server that owns the data.
///
/// Objects are only built by [`StructuredObject::for_local_use`], which
/// stamps the hierarchy with [`ResourceHierarchy::LocalUseOnly`]. There is no
/// way to change the stamp afterwards, so plugins can rely on it when deciding
/// not to forward the object.
#[derive(Debug)]
pub struct StructuredObject {
    sub_file: SubFile,
    session: Arc<SessionContext>,
    hierarchy: ResourceHierarchy,
}

impl StructuredObject {
    /// Builds a terminal, single-resource object from a request.
    #[must_use]
    pub fn for_local_use(request: &StructFileRequest) -> Self {
        Self {
            sub_file: request.sub_file().clone(),
            session: Arc::clone(request.session()),
            hierarchy: ResourceHierarchy::LocalUseOnly,
        }
    }

    /// Returns the path being operated on inside the container.
    #[must_use]
    pub fn physical_path(&self) -> &str {
        self.sub_file.sub_path()
    }

    /// Returns the physical path of the container file.
    #[must_use]
    pub fn container_path(&self) -> &str {
        self.sub_file.container().container_path()
    }

    /// Returns the container format used to pick a plugin.
    #[must_use]
    pub const fn format(&self) -> &StructFileType {
        self.sub_file.container().format()
    }

    /// Returns the hierarchy attached for execution.
    #[must_use]
    pub const fn hierarchy(&self) -> &ResourceHierarchy {
        &self.hierarchy
    }

    /// Returns the hierarchy the caller addressed, kept for diagnostics.
    #[must_use]
    pub const fn original_hierarchy(&self) -> &ResourceHierarchy {
        self.sub_file.container().hierarchy()
    }

    /// Returns the address of the owning resource.
    #[must_use]
    pub const fn address(&self) -> &HostAddress {
        self.sub_file.address()
    }

    /// Returns the caller's session.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

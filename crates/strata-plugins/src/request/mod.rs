//! Inbound request types for structured-file operations.
//!
//! A [`SubFile`] is the serialisable description of the target: the owning
//! resource's address, the container that embeds the virtual filesystem and
//! the path inside it. It is what travels to a peer when a request is
//! forwarded. A [`StructFileRequest`] pairs it with the caller's session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::address::HostAddress;
use crate::format::StructFileType;
use crate::hierarchy::ResourceHierarchy;
use crate::session::SessionContext;

/// Container that embeds a virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    format: StructFileType,
    container_path: String,
    hierarchy: ResourceHierarchy,
}

impl ContainerSpec {
    /// Describes a container stored at `container_path`.
    #[must_use]
    pub fn new(
        format: StructFileType,
        container_path: impl Into<String>,
        hierarchy: ResourceHierarchy,
    ) -> Self {
        Self {
            format,
            container_path: container_path.into(),
            hierarchy,
        }
    }

    /// Returns the container format.
    #[must_use]
    pub const fn format(&self) -> &StructFileType {
        &self.format
    }

    /// Returns the physical path of the container file.
    #[must_use]
    pub fn container_path(&self) -> &str {
        self.container_path.as_str()
    }

    /// Returns the resource hierarchy that stores the container.
    #[must_use]
    pub const fn hierarchy(&self) -> &ResourceHierarchy {
        &self.hierarchy
    }
}

/// Target of a structured-file operation.
///
/// # Example
///
/// ```
/// use strata_plugins::{ContainerSpec, HostAddress, StructFileType, SubFile};
///
/// let sub_file = SubFile::new(
///     HostAddress::new("vault-a.grid", 1247, "tarResc"),
///     ContainerSpec::new(
///         StructFileType::new("tar").unwrap(),
///         "/grid/vaultA/archive.tar",
///         "tarResc".parse().unwrap(),
///     ),
///     "/grid/vaultA/archive.tar/docs",
/// );
/// assert_eq!(sub_file.container().container_path(), "/grid/vaultA/archive.tar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubFile {
    address: HostAddress,
    container: ContainerSpec,
    sub_path: String,
}

impl SubFile {
    /// Builds a target description.
    #[must_use]
    pub fn new(
        address: HostAddress,
        container: ContainerSpec,
        sub_path: impl Into<String>,
    ) -> Self {
        Self {
            address,
            container,
            sub_path: sub_path.into(),
        }
    }

    /// Returns the address of the resource owning the container.
    #[must_use]
    pub const fn address(&self) -> &HostAddress {
        &self.address
    }

    /// Returns the container description.
    #[must_use]
    pub const fn container(&self) -> &ContainerSpec {
        &self.container
    }

    /// Returns the path inside the container.
    #[must_use]
    pub fn sub_path(&self) -> &str {
        self.sub_path.as_str()
    }
}

/// A structured-file request bound to the caller's session.
///
/// Requests are immutable; the dispatch layer only reads them.
#[derive(Debug, Clone)]
pub struct StructFileRequest {
    sub_file: SubFile,
    session: Arc<SessionContext>,
}

impl StructFileRequest {
    /// Binds a target description to a session.
    #[must_use]
    pub const fn new(sub_file: SubFile, session: Arc<SessionContext>) -> Self {
        Self { sub_file, session }
    }

    /// Returns the target description.
    #[must_use]
    pub const fn sub_file(&self) -> &SubFile {
        &self.sub_file
    }

    /// Returns the caller's session.
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Returns the address of the resource owning the container.
    #[must_use]
    pub const fn address(&self) -> &HostAddress {
        self.sub_file.address()
    }

    /// Returns the path inside the container.
    #[must_use]
    pub fn sub_path(&self) -> &str {
        self.sub_file.sub_path()
    }
}

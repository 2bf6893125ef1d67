//! Structured-object layer for container-embedded virtual filesystems.
//!
//! A *structured file* is an opaque container object, such as a tar or zip
//! archive, that stores a virtual filesystem. This crate models requests
//! against such containers and routes them to format plugins without the
//! caller knowing which format is involved.
//!
//! # Architecture
//!
//! A [`StructFileRequest`] names the container ([`ContainerSpec`]), the path
//! inside it and the [`HostAddress`] of the resource that owns it, bound to
//! the caller's [`SessionContext`]. Once the owning server is known to be the
//! current process, the request becomes a [`StructuredObject`] stamped with
//! [`ResourceHierarchy::LocalUseOnly`]. [`PluginDispatch`] then selects the
//! [`StructFilePlugin`] registered for the object's [`StructFileType`] in a
//! [`PluginRegistry`] and invokes it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use strata_plugins::{
//!     ContainerSpec, DirectoryHandle, HostAddress, PluginDispatch, PluginFailure,
//!     PluginRegistry, SessionContext, StructFilePlugin, StructFileRequest, StructFileType,
//!     StructuredObject, SubFile,
//! };
//!
//! struct TarPlugin(StructFileType);
//!
//! impl StructFilePlugin for TarPlugin {
//!     fn format(&self) -> &StructFileType {
//!         &self.0
//!     }
//!
//!     fn open_directory(
//!         &self,
//!         object: &StructuredObject,
//!     ) -> Result<DirectoryHandle, PluginFailure> {
//!         object
//!             .session()
//!             .directory_handles()
//!             .allocate()
//!             .ok_or_else(|| PluginFailure::new(-1, "too many open directories"))
//!     }
//! }
//!
//! let tar = StructFileType::new("tar").unwrap();
//! let mut registry = PluginRegistry::new();
//! registry.register(Arc::new(TarPlugin(tar.clone()))).unwrap();
//! let dispatch = PluginDispatch::new(Arc::new(registry));
//!
//! let sub_file = SubFile::new(
//!     HostAddress::new("localhost", 1247, "tarResc"),
//!     ContainerSpec::new(tar, "/grid/vaultA/archive.tar", "tarResc".parse().unwrap()),
//!     "/grid/vaultA/archive.tar/docs",
//! );
//! let request = StructFileRequest::new(sub_file, Arc::new(SessionContext::new(1, "rods")));
//! let object = StructuredObject::for_local_use(&request);
//! let handle = dispatch.open_directory(&object).unwrap();
//! assert_eq!(handle.get(), 0);
//! ```

pub mod address;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod hierarchy;
pub mod object;
pub mod plugin;
pub mod registry;
pub mod request;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod tests;

pub use self::address::{AddressParseError, HostAddress};
pub use self::dispatch::PluginDispatch;
pub use self::error::{ModelError, PLUGIN_ERROR, PLUGIN_NOT_FOUND, PluginError, PluginFailure};
pub use self::format::StructFileType;
pub use self::hierarchy::ResourceHierarchy;
pub use self::object::StructuredObject;
pub use self::plugin::StructFilePlugin;
pub use self::registry::PluginRegistry;
pub use self::request::{ContainerSpec, StructFileRequest, SubFile};
pub use self::session::{DirectoryHandle, HandleAllocator, SessionContext};

//! Dispatch core for opening directories inside structured files.
//!
//! A request to open a directory inside a container object (a tar or zip
//! archive stored in the grid) can arrive at any server. The
//! [`StructFileService`] first asks a [`HostResolver`] which server owns the
//! container's resource:
//!
//! - when this process owns it, the [`LocalExecutor`] hands the request to
//!   the format plugin through [`strata_plugins::PluginDispatch`];
//! - when a peer owns it, the [`RemoteDelegator`] obtains a connection from
//!   a [`ConnectionEstablisher`] and re-issues the request through a
//!   [`RemoteCallProxy`].
//!
//! Either way the caller receives a [`DirectoryHandle`](strata_plugins::DirectoryHandle)
//! or a [`StructFileError`] whose [`code`](StructFileError::code) is the
//! status reported to clients. Codes from plugins and peers pass through
//! unchanged.

pub mod errors;
pub mod local;
pub mod locality;
pub mod remote;
pub mod service;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::errors::{
    INVALID_SERVER_HOST, StructFileError, UNRECOGNISED_LOCALITY, UNRESOLVED_HOST, status_of,
};
pub use self::local::LocalExecutor;
pub use self::locality::{
    HostClassification, HostResolver, PeerHost, ResolvedLocality, TopologyResolver,
    resolve_locality,
};
pub use self::remote::{
    CONNECTION_FAILED, ConnectError, ConnectionEstablisher, ConnectionPool, RemoteCallProxy,
    RemoteDelegator, ServerConnector,
};
pub use self::service::StructFileService;

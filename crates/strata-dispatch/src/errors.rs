//! Error taxonomy for structured-file dispatch.
//!
//! Every failure the dispatch core can report is a [`StructFileError`]
//! variant. Each variant maps to the negative status code returned to
//! clients. Codes that originate in a collaborator (the host resolver, the
//! connection layer, a remote peer or a format plugin) are passed through
//! unchanged so they can be correlated across servers.

use thiserror::Error;

use strata_plugins::{DirectoryHandle, PluginError};

use crate::remote::ConnectError;

/// A remote branch was chosen without a usable peer.
pub const INVALID_SERVER_HOST: i32 = -24_000;

/// The host resolver returned a locality outside the known set.
pub const UNRECOGNISED_LOCALITY: i32 = -25_000;

/// The owning host is not part of the known topology.
pub const UNRESOLVED_HOST: i32 = -26_000;

/// Errors surfaced by structured-file dispatch.
#[derive(Debug, Error)]
pub enum StructFileError {
    /// The host resolver could not place the owning resource.
    #[error("could not resolve host for {address} (status {code})")]
    UnresolvedHost {
        /// Address that failed to resolve.
        address: String,
        /// Status reported by the resolver.
        code: i32,
    },

    /// A remote branch was chosen without a peer.
    #[error("invalid server host: remote locality without a peer")]
    InvalidServerHost,

    /// The host resolver returned an unknown locality value.
    #[error("host resolver returned unrecognised locality value {value}")]
    UnrecognisedLocality {
        /// Raw value returned by the resolver.
        value: i32,
    },

    /// The server-to-server connection could not be established.
    #[error("connection to peer '{peer}' failed: {source}")]
    Connection {
        /// Peer that was being contacted.
        peer: String,
        /// Failure reported by the connection layer.
        #[source]
        source: ConnectError,
    },

    /// The peer's own open attempt failed.
    #[error("peer '{peer}' failed to open directory {path} (status {code})")]
    RemoteOperation {
        /// Peer that executed the request.
        peer: String,
        /// Path inside the container.
        path: String,
        /// Status returned by the peer.
        code: i32,
    },

    /// The local format plugin could not be resolved or failed.
    #[error("failed to open directory {path}: {source}")]
    Plugin {
        /// Path inside the container.
        path: String,
        /// Failure reported by plugin dispatch.
        #[source]
        source: PluginError,
    },
}

impl StructFileError {
    /// Returns the negative status code reported to the caller.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::UnresolvedHost { code, .. } | Self::RemoteOperation { code, .. } => *code,
            Self::InvalidServerHost => INVALID_SERVER_HOST,
            Self::UnrecognisedLocality { .. } => UNRECOGNISED_LOCALITY,
            Self::Connection { source, .. } => source.code(),
            Self::Plugin { source, .. } => source.code(),
        }
    }
}

/// Collapses an open-directory outcome to the wire-level status integer.
///
/// Non-negative values are handles, negative values are error codes.
#[must_use]
pub fn status_of(result: &Result<DirectoryHandle, StructFileError>) -> i32 {
    match result {
        Ok(handle) => handle.get(),
        Err(error) => error.code(),
    }
}

//! Delegation of structured-file requests to the owning peer.
//!
//! When the owning resource is served elsewhere, [`RemoteDelegator`]
//! obtains a server-to-server connection from a [`ConnectionEstablisher`]
//! and re-issues the request through a [`RemoteCallProxy`]. The peer runs
//! its own dispatch and its status is returned unchanged. Nothing is
//! retried here; a failed connection or a failed peer call is reported once.

mod pool;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use strata_plugins::{DirectoryHandle, StructFileRequest, SubFile};

use crate::errors::StructFileError;
use crate::locality::PeerHost;

pub use self::pool::{ConnectionPool, ServerConnector};

/// Tracing target for remote delegation.
pub const REMOTE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::remote");

/// Status used when a connection fails without a status of its own.
pub const CONNECTION_FAILED: i32 = -305_000;

/// Failure to obtain a connection to a peer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (peer {peer}, status {code})")]
pub struct ConnectError {
    peer: String,
    code: i32,
    message: String,
}

impl ConnectError {
    /// Builds a connection error. Non-negative codes become
    /// [`CONNECTION_FAILED`].
    #[must_use]
    pub fn new(peer: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            code: if code < 0 { code } else { CONNECTION_FAILED },
            message: message.into(),
        }
    }

    /// Name of the peer that could not be reached.
    #[must_use]
    pub fn peer(&self) -> &str {
        self.peer.as_str()
    }

    /// Negative status reported by the connection layer.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Supplies established, authenticated connections to peers.
///
/// Implementations decide whether connections are cached; the delegator
/// only asks for one per request.
pub trait ConnectionEstablisher: Send + Sync {
    /// Connection type handed to the [`RemoteCallProxy`].
    type Connection: Send + Sync;

    /// Returns a usable connection to `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] when the peer cannot be reached or refuses
    /// the connection.
    fn acquire(&self, peer: &PeerHost) -> Result<Arc<Self::Connection>, ConnectError>;
}

/// Re-issues an open-directory request on a peer.
///
/// The return value is the peer's raw status: a handle when non-negative,
/// an error code otherwise. Transport failures during the call are reported
/// the same way.
pub trait RemoteCallProxy<C>: Send + Sync {
    /// Asks the peer behind `connection` to open `sub_file`.
    fn open_directory(&self, connection: &C, sub_file: &SubFile) -> i32;
}

/// Forwards requests to the peer that owns the container.
#[derive(Debug)]
pub struct RemoteDelegator<E, P> {
    establisher: E,
    proxy: P,
}

impl<E, P> RemoteDelegator<E, P>
where
    E: ConnectionEstablisher,
    P: RemoteCallProxy<E::Connection>,
{
    /// Creates a delegator from a connection source and a call proxy.
    pub const fn new(establisher: E, proxy: P) -> Self {
        Self { establisher, proxy }
    }

    /// Returns the connection source.
    pub const fn establisher(&self) -> &E {
        &self.establisher
    }

    /// Returns the call proxy.
    pub const fn proxy(&self) -> &P {
        &self.proxy
    }

    /// Opens the directory on `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`StructFileError::InvalidServerHost`] when `peer` is absent,
    /// [`StructFileError::Connection`] when no connection can be obtained and
    /// [`StructFileError::RemoteOperation`] when the peer reports a failure.
    pub fn open_directory(
        &self,
        request: &StructFileRequest,
        peer: Option<&PeerHost>,
    ) -> Result<DirectoryHandle, StructFileError> {
        let Some(peer) = peer else {
            warn!(
                target: REMOTE_TARGET,
                path = request.sub_path(),
                "invalid server host: remote locality without a peer"
            );
            return Err(StructFileError::InvalidServerHost);
        };

        let connection = self.establisher.acquire(peer).map_err(|source| {
            warn!(
                target: REMOTE_TARGET,
                peer = peer.name(),
                path = request.sub_path(),
                code = source.code(),
                "could not connect to peer for {}: {source}",
                request.sub_path()
            );
            StructFileError::Connection {
                peer: peer.name().to_owned(),
                source,
            }
        })?;

        let status = self.proxy.open_directory(&connection, request.sub_file());
        DirectoryHandle::try_from(status).map_err(|_| {
            warn!(
                target: REMOTE_TARGET,
                peer = peer.name(),
                path = request.sub_path(),
                code = status,
                "remote open-directory failed for {} with status {status}",
                request.sub_path()
            );
            StructFileError::RemoteOperation {
                peer: peer.name().to_owned(),
                path: request.sub_path().to_owned(),
                code: status,
            }
        })
    }
}

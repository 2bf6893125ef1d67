//! Pooled server-to-server connections.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use super::{CONNECTION_FAILED, ConnectError, ConnectionEstablisher, REMOTE_TARGET};
use crate::locality::PeerHost;

/// Opens a fresh connection to a peer.
pub trait ServerConnector: Send + Sync {
    /// Connection type produced by the connector.
    type Connection: Send + Sync;

    /// Connects and authenticates to `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] when the peer cannot be reached.
    fn connect(&self, peer: &PeerHost) -> Result<Self::Connection, ConnectError>;
}

/// Caches one connection per peer name.
///
/// The first request for a peer connects through the wrapped
/// [`ServerConnector`]; later requests reuse the cached connection until it
/// is evicted. Failed connections are never cached.
pub struct ConnectionPool<S: ServerConnector> {
    connector: S,
    connections: Mutex<HashMap<String, Arc<S::Connection>>>,
}

impl<S: ServerConnector> ConnectionPool<S> {
    /// Creates an empty pool around `connector`.
    #[must_use]
    pub fn new(connector: S) -> Self {
        Self {
            connector,
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the wrapped connector.
    pub const fn connector(&self) -> &S {
        &self.connector
    }

    /// Drops the cached connection to `peer_name`, returning whether one existed.
    pub fn evict(&self, peer_name: &str) -> bool {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(peer_name)
            .is_some()
    }

    /// Names of peers with a cached connection, sorted.
    #[must_use]
    pub fn connected_peers(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl<S: ServerConnector> ConnectionEstablisher for ConnectionPool<S> {
    type Connection = S::Connection;

    fn acquire(&self, peer: &PeerHost) -> Result<Arc<Self::Connection>, ConnectError> {
        let mut connections = self.connections.lock().map_err(|_| {
            ConnectError::new(peer.name(), CONNECTION_FAILED, "connection pool lock poisoned")
        })?;
        if let Some(existing) = connections.get(peer.name()) {
            return Ok(Arc::clone(existing));
        }

        debug!(target: REMOTE_TARGET, peer = %peer, "connecting to peer");
        let connection = self.connector.connect(peer).map(Arc::new).map_err(|error| {
            warn!(
                target: REMOTE_TARGET,
                peer = %peer,
                code = error.code(),
                "connection attempt failed: {}",
                error.message()
            );
            error
        })?;
        connections.insert(peer.name().to_owned(), Arc::clone(&connection));
        Ok(connection)
    }
}

impl<S: ServerConnector> fmt::Debug for ConnectionPool<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ConnectionPool")
            .field("connected_peers", &self.connected_peers())
            .finish_non_exhaustive()
    }
}

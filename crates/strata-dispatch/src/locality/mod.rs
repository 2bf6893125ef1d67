//! Host locality resolution.
//!
//! Before a structured-file request is executed the dispatch core asks a
//! [`HostResolver`] whether the resource that owns the container is served
//! by this process or by a peer. [`resolve_locality`] narrows the resolver's
//! raw [`HostClassification`] to the two executable outcomes in
//! [`ResolvedLocality`]; every other outcome becomes a [`StructFileError`].

mod topology;

use std::fmt;

use tracing::warn;

use strata_config::PeerConfig;
use strata_plugins::HostAddress;

use crate::errors::{StructFileError, UNRESOLVED_HOST};

pub use self::topology::TopologyResolver;

/// Tracing target for locality resolution.
pub const LOCALITY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::locality");

/// A remote server that can execute structured-file requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerHost {
    name: String,
    zone: String,
    host: String,
    port: u16,
}

impl PeerHost {
    /// Builds a peer reachable at `host:port`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        zone: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            zone: zone.into(),
            host: host.into(),
            port,
        }
    }

    /// Builds a peer from its configuration entry, connecting to the first
    /// listed host name.
    #[must_use]
    pub fn from_config(peer: &PeerConfig) -> Self {
        let host = peer.host_names.first().cloned().unwrap_or_default();
        Self::new(peer.name.clone(), peer.zone.clone(), host, peer.port)
    }

    /// Unique peer name; pooled connections are keyed by it.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Zone the peer belongs to.
    #[must_use]
    pub fn zone(&self) -> &str {
        self.zone.as_str()
    }

    /// Host name used to connect.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Port used to connect.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for PeerHost {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} ({}:{})", self.name, self.host, self.port)
    }
}

/// Raw answer from a [`HostResolver`].
///
/// Resolvers that speak the integer protocol of older servers can use
/// [`HostClassification::from_flag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostClassification {
    /// The resource is served by this process.
    Local,
    /// The resource is served by a peer. The peer may be absent when the
    /// topology names a remote owner it cannot describe.
    Remote(Option<PeerHost>),
    /// Resolution failed with the given status.
    Unresolved(i32),
    /// The resolver produced a value outside the known set.
    Unrecognised(i32),
}

impl HostClassification {
    /// Integer flag for a local resource.
    pub const LOCAL_FLAG: i32 = 0;
    /// Integer flag for a remote resource.
    pub const REMOTE_FLAG: i32 = 1;

    /// Classifies an integer locality flag.
    ///
    /// Negative values are resolution failures and other unknown values are
    /// kept verbatim so they can be reported.
    ///
    /// ```
    /// use strata_dispatch::locality::HostClassification;
    ///
    /// assert_eq!(HostClassification::from_flag(0, None), HostClassification::Local);
    /// assert_eq!(HostClassification::from_flag(-7, None), HostClassification::Unresolved(-7));
    /// assert_eq!(HostClassification::from_flag(7, None), HostClassification::Unrecognised(7));
    /// ```
    #[must_use]
    pub fn from_flag(flag: i32, peer: Option<PeerHost>) -> Self {
        match flag {
            Self::LOCAL_FLAG => Self::Local,
            Self::REMOTE_FLAG => Self::Remote(peer),
            code if code < 0 => Self::Unresolved(code),
            other => Self::Unrecognised(other),
        }
    }
}

/// Decides which server owns a resource.
pub trait HostResolver: Send + Sync {
    /// Classifies the server that owns `address`.
    fn classify(&self, address: &HostAddress) -> HostClassification;
}

/// Executable outcome of locality resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLocality {
    /// Execute in this process.
    Local,
    /// Forward to a peer, which may be absent.
    Remote(Option<PeerHost>),
}

/// Resolves the locality of `address`, turning resolver failures into errors.
///
/// # Errors
///
/// Returns [`StructFileError::UnresolvedHost`] carrying the resolver's status
/// when resolution fails and [`StructFileError::UnrecognisedLocality`] when
/// the resolver returns an unknown value.
pub fn resolve_locality<R>(
    resolver: &R,
    address: &HostAddress,
) -> Result<ResolvedLocality, StructFileError>
where
    R: HostResolver + ?Sized,
{
    match resolver.classify(address) {
        HostClassification::Local => Ok(ResolvedLocality::Local),
        HostClassification::Remote(peer) => Ok(ResolvedLocality::Remote(peer)),
        HostClassification::Unresolved(status) => {
            let code = if status < 0 { status } else { UNRESOLVED_HOST };
            warn!(
                target: LOCALITY_TARGET,
                address = %address,
                code,
                "failed to resolve owning host"
            );
            Err(StructFileError::UnresolvedHost {
                address: address.to_string(),
                code,
            })
        }
        HostClassification::Unrecognised(value) => {
            warn!(
                target: LOCALITY_TARGET,
                address = %address,
                value,
                "host resolver returned unrecognised value {value}"
            );
            Err(StructFileError::UnrecognisedLocality { value })
        }
    }
}

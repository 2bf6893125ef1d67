//! Locality resolution from static grid configuration.

use strata_config::Config;
use strata_plugins::HostAddress;

use super::{HostClassification, HostResolver, PeerHost};
use crate::errors::UNRESOLVED_HOST;

/// Resolves hosts against the configured local server and peers.
///
/// A host the local server answers to is local. A host a peer answers to
/// is remote, even when the port differs, so the peer's configured port is
/// used for connecting. Any other host is unresolved.
#[derive(Debug, Clone)]
pub struct TopologyResolver {
    config: Config,
}

impl TopologyResolver {
    /// Creates a resolver over validated configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configuration the resolver consults.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl HostResolver for TopologyResolver {
    fn classify(&self, address: &HostAddress) -> HostClassification {
        let local = &self.config.local_server;
        if local.answers_to(address.host()) && local.port == address.port() {
            return HostClassification::Local;
        }
        self.config.peer_for_host(address.host()).map_or(
            HostClassification::Unresolved(UNRESOLVED_HOST),
            |peer| HostClassification::Remote(Some(PeerHost::from_config(peer))),
        )
    }
}

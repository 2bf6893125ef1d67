//! Declarative description of the servers that make up the grid.
//!
//! The local server and each peer are identified by the host names they
//! answer to. Host name comparison ignores ASCII case because addresses
//! arrive from clients and catalogue entries with inconsistent casing.

use serde::{Deserialize, Serialize};

use crate::defaults::{default_local_host_names, default_port};

/// Identity of the server process reading this configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerIdentity {
    /// Zone the server belongs to.
    #[serde(default)]
    pub zone: String,
    /// Host names (and literal addresses) this server answers to.
    #[serde(default = "default_local_host_names")]
    pub host_names: Vec<String>,
    /// Port the server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerIdentity {
    /// Builds an identity answering to the supplied host names.
    #[must_use]
    pub fn new(zone: impl Into<String>, host_names: Vec<String>, port: u16) -> Self {
        Self {
            zone: zone.into(),
            host_names,
            port,
        }
    }

    /// Returns `true` when `host` names this server.
    #[must_use]
    pub fn answers_to(&self, host: &str) -> bool {
        matches_any(&self.host_names, host)
    }
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            zone: String::new(),
            host_names: default_local_host_names(),
            port: default_port(),
        }
    }
}

/// A remote server that owns some of the grid's storage resources.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PeerConfig {
    /// Unique name used to key pooled connections.
    pub name: String,
    /// Zone the peer belongs to.
    #[serde(default)]
    pub zone: String,
    /// Host names (and literal addresses) the peer answers to.
    pub host_names: Vec<String>,
    /// Port the peer listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl PeerConfig {
    /// Builds a peer entry in the default zone on the default port.
    #[must_use]
    pub fn new(name: impl Into<String>, host_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            zone: String::new(),
            host_names,
            port: default_port(),
        }
    }

    /// Returns `true` when `host` names this peer.
    #[must_use]
    pub fn answers_to(&self, host: &str) -> bool {
        matches_any(&self.host_names, host)
    }
}

fn matches_any(names: &[String], host: &str) -> bool {
    let wanted = host.trim();
    names.iter().any(|name| name.eq_ignore_ascii_case(wanted))
}

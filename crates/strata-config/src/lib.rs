//! Shared configuration for the structured-file dispatch layer.
//!
//! A [`Config`] describes where the current process sits in the storage
//! grid (its own [`ServerIdentity`] and the [`PeerConfig`] entries it can
//! forward to) together with the logging settings used by telemetry.
//! Configuration is read from JSON; every field falls back to the values in
//! [`defaults`] so a minimal file only needs to name the peers.

pub mod defaults;
mod logging;
mod topology;

use std::collections::HashSet;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{DEFAULT_LOG_FILTER, DEFAULT_PORT, default_log_filter, default_log_format};
pub use logging::{LogFormat, LogFormatParseError};
pub use topology::{PeerConfig, ServerIdentity};

/// Grid topology and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// The server this process runs as.
    #[serde(default)]
    pub local_server: ServerIdentity,
    /// Remote servers that requests may be forwarded to.
    #[serde(default)]
    pub peers: Vec<PeerConfig>,
    /// `tracing` filter expression.
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Output format for log records.
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            local_server: ServerIdentity::default(),
            peers: Vec::new(),
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
        }
    }
}

impl Config {
    /// Parses and validates configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when the topology is inconsistent.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)
            .map_err(|source| ConfigError::Parse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors documented on [`Config::from_json_str`].
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the topology for blank names, duplicates and self-references.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.local_server.host_names.iter().any(|h| h.trim().is_empty()) {
            return Err(ConfigError::invalid("local server host names must not be blank"));
        }

        let mut seen = HashSet::new();
        for peer in &self.peers {
            if peer.name.trim().is_empty() {
                return Err(ConfigError::invalid("peer names must not be blank"));
            }
            if !seen.insert(peer.name.to_ascii_lowercase()) {
                return Err(ConfigError::invalid(format!(
                    "peer '{}' is configured more than once",
                    peer.name
                )));
            }
            if peer.host_names.is_empty() || peer.host_names.iter().any(|h| h.trim().is_empty()) {
                return Err(ConfigError::invalid(format!(
                    "peer '{}' must list at least one non-blank host name",
                    peer.name
                )));
            }
            if let Some(alias) = peer
                .host_names
                .iter()
                .find(|host| self.local_server.answers_to(host))
            {
                return Err(ConfigError::invalid(format!(
                    "peer '{}' answers to '{alias}', which names the local server",
                    peer.name
                )));
            }
        }
        Ok(())
    }

    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Finds the peer answering to `host`, if any.
    #[must_use]
    pub fn peer_for_host(&self, host: &str) -> Option<&PeerConfig> {
        self.peers.iter().find(|peer| peer.answers_to(host))
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        /// File that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration was not valid JSON for the expected schema.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// File that was parsed, when loading from disk.
        path: Option<Utf8PathBuf>,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The configuration parsed but describes an inconsistent topology.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// Description of the problem.
        message: String,
    },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

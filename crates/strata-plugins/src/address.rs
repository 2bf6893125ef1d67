//! Network address of the resource that owns a container.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// URL scheme used for textual host addresses.
pub const ADDRESS_SCHEME: &str = "grid";

/// Host, port and resource name identifying where a container lives.
///
/// The textual form is `grid://host:port/resource`.
///
/// # Example
///
/// ```
/// use strata_plugins::HostAddress;
///
/// let address: HostAddress = "grid://vault-a.grid:1247/archiveResc".parse().unwrap();
/// assert_eq!(address.host(), "vault-a.grid");
/// assert_eq!(address.port(), 1247);
/// assert_eq!(address.resource(), "archiveResc");
/// assert_eq!(address.to_string(), "grid://vault-a.grid:1247/archiveResc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostAddress {
    host: String,
    port: u16,
    resource: String,
}

impl HostAddress {
    /// Builds an address from its parts.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, resource: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            resource: resource.into(),
        }
    }

    /// Returns the host name or literal address.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the storage resource name.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.resource.as_str()
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{ADDRESS_SCHEME}://{}:{}/{}",
            self.host, self.port, self.resource
        )
    }
}

impl FromStr for HostAddress {
    type Err = AddressParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        if url.scheme() != ADDRESS_SCHEME {
            return Err(AddressParseError::UnsupportedScheme(url.scheme().to_owned()));
        }
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| AddressParseError::MissingHost(input.to_owned()))?;
        let port = url
            .port()
            .ok_or_else(|| AddressParseError::MissingPort(input.to_owned()))?;
        let resource = url.path().trim_start_matches('/');
        if resource.is_empty() {
            return Err(AddressParseError::MissingResource(input.to_owned()));
        }
        Ok(Self::new(host, port, resource))
    }
}

/// Errors encountered while parsing a [`HostAddress`] from text.
#[derive(Debug, Error)]
pub enum AddressParseError {
    /// Scheme was not `grid`.
    #[error("unsupported address scheme '{0}'")]
    UnsupportedScheme(String),
    /// Host name was missing.
    #[error("missing host in '{0}'")]
    MissingHost(String),
    /// Port was missing.
    #[error("missing port in '{0}'")]
    MissingPort(String),
    /// Resource name was missing.
    #[error("missing resource name in '{0}'")]
    MissingResource(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

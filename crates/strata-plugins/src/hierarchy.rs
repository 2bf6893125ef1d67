//! Resource hierarchies and the local-use-only sentinel.
//!
//! A hierarchy names the chain of storage resources, root first, that
//! services a data object. Structured objects built for terminal, single
//! resource execution carry [`ResourceHierarchy::LocalUseOnly`] instead so
//! that no plugin tries to route them onward.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Separator between resource names in the textual form.
pub const HIERARCHY_SEPARATOR: char = ';';

/// Textual form of the local-use-only sentinel.
pub const LOCAL_USE_ONLY: &str = "local-use-only";

/// Chain of storage resources responsible for a data object.
///
/// # Example
///
/// ```
/// use strata_plugins::ResourceHierarchy;
///
/// let hierarchy: ResourceHierarchy = "replResc;vaultA;tarResc".parse().unwrap();
/// assert_eq!(hierarchy.leaf(), Some("tarResc"));
/// assert!(!hierarchy.is_local_use_only());
/// assert!(ResourceHierarchy::LocalUseOnly.is_local_use_only());
/// ```
///
/// The serialised form is the same `root;child;leaf` text, so anything read
/// back from the wire passes the same validation as parsed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceHierarchy {
    /// Sentinel for objects that must be serviced where they are and never
    /// forwarded to another resource.
    LocalUseOnly,
    /// Resource names ordered from root to leaf.
    Chain(Vec<String>),
}

impl ResourceHierarchy {
    /// Returns `true` for the local-use-only sentinel.
    #[must_use]
    pub const fn is_local_use_only(&self) -> bool {
        matches!(self, Self::LocalUseOnly)
    }

    /// Returns the resource names, empty for the sentinel.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        match self {
            Self::LocalUseOnly => &[],
            Self::Chain(segments) => segments.as_slice(),
        }
    }

    /// Returns the resource that ultimately stores the data.
    #[must_use]
    pub fn leaf(&self) -> Option<&str> {
        self.segments().last().map(String::as_str)
    }

    /// Returns the resource the chain starts from.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.segments().first().map(String::as_str)
    }
}

impl fmt::Display for ResourceHierarchy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalUseOnly => formatter.write_str(LOCAL_USE_ONLY),
            Self::Chain(segments) => {
                for (index, segment) in segments.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, "{HIERARCHY_SEPARATOR}")?;
                    }
                    formatter.write_str(segment)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for ResourceHierarchy {
    type Err = ModelError;

    /// Parses `root;child;leaf`. The sentinel is never produced by parsing.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ModelError::InvalidHierarchy {
            input: input.to_owned(),
            reason,
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("hierarchy is empty"));
        }
        let segments: Vec<String> = trimmed
            .split(HIERARCHY_SEPARATOR)
            .map(|segment| segment.trim().to_owned())
            .collect();
        if segments.iter().any(String::is_empty) {
            return Err(invalid("hierarchy contains an empty resource name"));
        }
        Ok(Self::Chain(segments))
    }
}

impl TryFrom<String> for ResourceHierarchy {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceHierarchy> for String {
    fn from(value: ResourceHierarchy) -> Self {
        value.to_string()
    }
}

//! Container format identifiers used to select a plugin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Identifier of a container format such as `tar` or `zip`.
///
/// Identifiers are normalised to lower case. Any non-blank identifier without
/// whitespace is accepted so new formats only need a registered plugin.
///
/// # Example
///
/// ```
/// use strata_plugins::StructFileType;
///
/// let format = StructFileType::new("TAR").unwrap();
/// assert_eq!(format.as_str(), "tar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StructFileType(String);

impl StructFileType {
    /// Validates and normalises a format identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidFormat`] for blank identifiers or ones
    /// containing whitespace.
    pub fn new(input: &str) -> Result<Self, ModelError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidFormat {
                input: input.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the normalised identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StructFileType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl FromStr for StructFileType {
    type Err = ModelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::new(input)
    }
}

impl TryFrom<String> for StructFileType {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<StructFileType> for String {
    fn from(value: StructFileType) -> Self {
        value.0
    }
}

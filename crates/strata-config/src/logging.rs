//! Output format for dispatch log records.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log records are rendered on standard error.
///
/// Accepted textual values are `json` and `compact`, in any case.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per record, fields flattened to the top level.
    #[default]
    Json,
    /// One terse text line per record, for operators at a terminal.
    Compact,
}

impl LogFormat {
    /// Returns `true` when records are emitted as machine-readable JSON.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when a [`LogFormat`] name is not recognised.
pub type LogFormatParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::json("json", LogFormat::Json, true)]
    #[case::compact("Compact", LogFormat::Compact, false)]
    fn names_parse_to_formats(
        #[case] name: &str,
        #[case] expected: LogFormat,
        #[case] structured: bool,
    ) {
        let parsed: LogFormat = name.parse().expect("known format");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.is_structured(), structured);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("pretty".parse::<LogFormat>().is_err());
    }
}

//! Delimiter and classification policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a policy name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct PolicyParseError {
    /// Which kind of policy was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated list of accepted names.
    pub expected: &'static str,
}

/// Which separator characters may appear between 4-digit groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelimiterPolicy {
    /// Only a contiguous run of digits is accepted.
    #[default]
    None,
    /// Groups may be separated by single spaces.
    Space,
    /// Groups may be separated by single dashes.
    Dash,
    /// Groups may be separated by spaces or dashes, but never a mix of both.
    SpaceOrDash,
}

impl DelimiterPolicy {
    /// All policies, in declaration order.
    pub const ALL: [Self; 4] = [Self::None, Self::Space, Self::Dash, Self::SpaceOrDash];

    /// Whether `c` is a separator this policy accepts between groups.
    #[must_use]
    pub fn allows(self, c: char) -> bool {
        match self {
            Self::None => false,
            Self::Space => c == ' ',
            Self::Dash => c == '-',
            Self::SpaceOrDash => c == ' ' || c == '-',
        }
    }

    /// The separator inserted when re-delimiting normalized digits.
    #[must_use]
    pub fn canonical_delimiter(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Space | Self::SpaceOrDash => Some(' '),
            Self::Dash => Some('-'),
        }
    }

    /// Stable lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Space => "space",
            Self::Dash => "dash",
            Self::SpaceOrDash => "space-or-dash",
        }
    }
}

impl fmt::Display for DelimiterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DelimiterPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| PolicyParseError {
                kind: "delimiter policy",
                value: s.to_owned(),
                expected: "none, space, dash, space-or-dash",
            })
    }
}

/// Whether the generic 13-19 digit fallback rule takes part in classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMode {
    /// The generic fallback applies after every named network.
    #[default]
    Lenient,
    /// Only named networks are reported; a well-formed number with no known
    /// prefix is valid with no network.
    Strict,
}

impl ClassificationMode {
    /// Stable lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassificationMode {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(PolicyParseError {
                kind: "classification mode",
                value: s.to_owned(),
                expected: "lenient, strict",
            }),
        }
    }
}

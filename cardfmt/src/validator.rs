//! The `validate` entry point: structural parse, normalization, classification.

use serde::{Deserialize, Serialize};

use crate::MAX_INPUT_LEN;
use crate::format::mask;
use crate::parse::{FormatError, parse_card_number};
use crate::policy::{ClassificationMode, DelimiterPolicy};
use crate::rules::{Network, classify};

/// Options for [`validate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ValidatorConfig {
    /// Which separators may appear between 4-digit groups.
    pub policy: DelimiterPolicy,
    /// Whether the generic fallback rule takes part in classification.
    pub mode: ClassificationMode,
    /// Inputs longer than this many bytes are rejected unscanned (default: 64).
    pub max_input_len: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            policy: DelimiterPolicy::default(),
            mode: ClassificationMode::default(),
            max_input_len: MAX_INPUT_LEN,
        }
    }
}

impl ValidatorConfig {
    /// Default configuration with the given delimiter policy.
    #[must_use]
    pub fn new(policy: DelimiterPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Replace the classification mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ClassificationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the input length cap.
    #[must_use]
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }
}

/// Outcome of validating one candidate.
///
/// `normalized_digits` holds only ASCII digits: the input with separators
/// removed when the structural parse succeeded, empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the candidate is a well-formed card number.
    pub is_valid: bool,
    /// The matched network, if any rule matched.
    pub network: Option<Network>,
    /// The candidate's digits with separators stripped.
    pub normalized_digits: String,
}

impl ValidationResult {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            network: None,
            normalized_digits: String::new(),
        }
    }

    /// Display name of the matched network.
    #[must_use]
    pub fn network_name(&self) -> Option<&'static str> {
        self.network.map(Network::name)
    }
}

/// Validate `input` under `policy` with lenient classification and the default length cap.
#[must_use]
pub fn validate(input: &str, policy: DelimiterPolicy) -> ValidationResult {
    validate_with(input, &ValidatorConfig::new(policy))
}

/// Validate `input` with explicit options. Malformed input yields an invalid result.
#[must_use]
pub fn validate_with(input: &str, config: &ValidatorConfig) -> ValidationResult {
    match try_validate(input, config) {
        Ok(result) => result,
        Err(err) => {
            tracing::trace!(
                len = input.len(),
                policy = %config.policy,
                %err,
                "card number rejected"
            );
            ValidationResult::invalid()
        }
    }
}

/// Like [`validate_with`], but reports why a structurally invalid input was rejected.
///
/// A number that parses but matches no rule (possible only in strict mode) is
/// `Ok` with `is_valid: true` and no network.
///
/// # Errors
/// Returns the [`FormatError`] from the structural parse.
pub fn try_validate(input: &str, config: &ValidatorConfig) -> Result<ValidationResult, FormatError> {
    let digits = parse_card_number(input, config.policy, config.max_input_len)?;
    let network = classify(&digits, config.mode).map(|rule| rule.network);

    tracing::trace!(
        digits = %mask(&digits),
        network = network.map_or("unknown", Network::name),
        mode = %config.mode,
        "card number accepted"
    );

    Ok(ValidationResult {
        is_valid: true,
        network,
        normalized_digits: digits,
    })
}

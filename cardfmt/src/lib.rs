//! Payment-card number format validation.
//!
//! Checks whether a string is *shaped* like a card number, optionally split
//! into 4-digit groups, and names the issuer network its prefix and length
//! superficially match. Nothing here checks authenticity or the Luhn checksum.
//!
//! ```
//! use cardfmt::{DelimiterPolicy, validate};
//!
//! let result = validate("4111-1111-1111-1111", DelimiterPolicy::SpaceOrDash);
//! assert!(result.is_valid);
//! assert_eq!(result.network_name(), Some("Visa"));
//! assert_eq!(result.normalized_digits, "4111111111111111");
//!
//! // The three separators must all be the same character.
//! assert!(!validate("4111-1111 1111-1111", DelimiterPolicy::SpaceOrDash).is_valid);
//! ```

pub mod format;
pub mod parse;
pub mod policy;
pub mod rules;
pub mod validator;

pub use format::{group_digits, mask};
pub use parse::{FormatError, parse_card_number};
pub use policy::{ClassificationMode, DelimiterPolicy, PolicyParseError};
pub use rules::{Network, NetworkRule, PrefixPattern, RULES, classify};
pub use validator::{ValidationResult, ValidatorConfig, try_validate, validate, validate_with};

/// Default cap on input length in bytes.
pub const MAX_INPUT_LEN: usize = 64;

/// Fewest digits in an undelimited card number.
pub const MIN_DIGITS: usize = 13;

/// Most digits in an undelimited card number.
pub const MAX_DIGITS: usize = 19;

/// Digits per group in delimited input.
pub const GROUP_LEN: usize = 4;

/// Groups in delimited input.
pub const GROUP_COUNT: usize = 4;

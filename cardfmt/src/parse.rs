//! Structural parsing of card-number candidates.
//!
//! A single left-to-right character scan. There is no backtracking, so the
//! cost is linear in the input length whatever the input looks like.

use thiserror::Error;

use crate::policy::DelimiterPolicy;
use crate::{GROUP_COUNT, GROUP_LEN, MAX_DIGITS, MIN_DIGITS};

/// Why a candidate is not shaped like a card number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The input is the empty string.
    #[error("input is empty")]
    Empty,

    /// The input exceeds the configured length cap.
    #[error("input too long ({len} bytes, max {max})")]
    TooLong {
        /// Input length in bytes.
        len: usize,
        /// The cap that was exceeded.
        max: usize,
    },

    /// A character that is neither a digit nor a recognised separator.
    #[error("invalid character '{}' at position {position}", .character.escape_default())]
    InvalidCharacter {
        /// 0-based character position.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// A space or dash that the delimiter policy does not permit.
    #[error(
        "delimiter '{}' at position {position} is not allowed by policy '{policy}'",
        .character.escape_default()
    )]
    DelimiterNotAllowed {
        /// 0-based character position.
        position: usize,
        /// The separator found.
        character: char,
        /// The policy in force.
        policy: DelimiterPolicy,
    },

    /// A separator that does not follow a complete 4-digit group.
    #[error("delimiter at position {position} must follow a group of 4 digits")]
    MisplacedDelimiter {
        /// 0-based character position.
        position: usize,
    },

    /// A separator that differs from the first separator in the input.
    #[error(
        "mixed delimiters: expected '{}' at position {position}, found '{}'",
        .expected.escape_default(),
        .found.escape_default()
    )]
    MixedDelimiters {
        /// 0-based character position.
        position: usize,
        /// The separator established by the first group boundary.
        expected: char,
        /// The separator found here.
        found: char,
    },

    /// Input under a delimiter policy that is not four groups of four digits.
    #[error("expected 4 groups of 4 digits, found {groups} group(s) and {digits} digits")]
    GroupCount {
        /// Number of groups seen.
        groups: usize,
        /// Total digits seen.
        digits: usize,
    },

    /// Under `DelimiterPolicy::None`, a digit run outside the 13-19 digit range.
    #[error("expected 13-19 digits, found {len}")]
    Length {
        /// Number of digits found.
        len: usize,
    },
}

/// Characters that some policy may accept as a group separator.
#[inline]
fn is_separator(c: char) -> bool {
    c == ' ' || c == '-'
}

/// Parse `input` under `policy` and return its digits with separators removed.
///
/// Accepted shapes:
/// - with [`DelimiterPolicy::None`], a contiguous run of 13-19 ASCII digits;
/// - with any other policy, four groups of exactly four digits joined by
///   three separators that are all the same character, or with every
///   separator left out.
///
/// Inputs longer than `max_len` bytes are rejected before they are scanned.
///
/// # Errors
/// Returns a [`FormatError`] naming the first structural problem found.
pub fn parse_card_number(
    input: &str,
    policy: DelimiterPolicy,
    max_len: usize,
) -> Result<String, FormatError> {
    if input.is_empty() {
        return Err(FormatError::Empty);
    }
    if input.len() > max_len {
        return Err(FormatError::TooLong {
            len: input.len(),
            max: max_len,
        });
    }

    let mut digits = String::with_capacity(input.len());
    let mut delimiter: Option<char> = None;
    let mut groups: usize = 1;
    let mut group_len: usize = 0;

    for (position, c) in input.chars().enumerate() {
        if c.is_ascii_digit() {
            digits.push(c);
            group_len += 1;
            continue;
        }
        if !is_separator(c) {
            return Err(FormatError::InvalidCharacter {
                position,
                character: c,
            });
        }
        if !policy.allows(c) {
            return Err(FormatError::DelimiterNotAllowed {
                position,
                character: c,
                policy,
            });
        }
        if group_len != GROUP_LEN {
            return Err(FormatError::MisplacedDelimiter { position });
        }
        // The first separator is captured; every later one must repeat it.
        match delimiter {
            None => delimiter = Some(c),
            Some(expected) if expected != c => {
                return Err(FormatError::MixedDelimiters {
                    position,
                    expected,
                    found: c,
                });
            }
            Some(_) => {}
        }
        groups += 1;
        group_len = 0;
    }

    if delimiter.is_none() {
        if policy.canonical_delimiter().is_none() {
            if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
                return Err(FormatError::Length { len: digits.len() });
            }
            return Ok(digits);
        }
        // Under a delimiter policy the separators may all be left out, but the
        // 4x4 shape still applies.
        if digits.len() != GROUP_LEN * GROUP_COUNT {
            return Err(FormatError::GroupCount {
                groups: 1,
                digits: digits.len(),
            });
        }
        return Ok(digits);
    }

    if groups != GROUP_COUNT || group_len != GROUP_LEN {
        return Err(FormatError::GroupCount {
            groups,
            digits: digits.len(),
        });
    }

    Ok(digits)
}

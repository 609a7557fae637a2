//! Rendering normalized digits: canonical grouping and masking.

use crate::policy::DelimiterPolicy;
use crate::{GROUP_COUNT, GROUP_LEN, MIN_DIGITS};

/// Leading digits left visible by [`mask`] (the issuer identification number).
pub const MASK_KEEP_LEADING: usize = 6;

/// Trailing digits left visible by [`mask`].
pub const MASK_KEEP_TRAILING: usize = 4;

/// Re-insert the policy's canonical delimiter between 4-digit groups.
///
/// Only the delimited shape (four groups of four) takes separators, so any
/// other length, or a policy without a delimiter, returns `digits` unchanged.
/// A delimiter policy only validates 16-digit numbers, so the grouping of a
/// valid result's `normalized_digits` re-validates under the same policy.
#[must_use]
pub fn group_digits(digits: &str, policy: DelimiterPolicy) -> String {
    let Some(sep) = policy.canonical_delimiter() else {
        return digits.to_owned();
    };
    if digits.len() != GROUP_LEN * GROUP_COUNT || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_owned();
    }

    let mut out = String::with_capacity(digits.len() + GROUP_COUNT - 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_LEN == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// Hide the middle digits of a card number, keeping separators and other
/// characters in place.
///
/// Values with at least 13 digits keep the first six and last four digits;
/// shorter values keep only the last four.
#[must_use]
pub fn mask(value: &str) -> String {
    let total = value.bytes().filter(u8::is_ascii_digit).count();
    let lead = if total >= MIN_DIGITS {
        MASK_KEEP_LEADING
    } else {
        0
    };
    let tail_start = total.saturating_sub(MASK_KEEP_TRAILING);

    let mut seen = 0;
    value
        .chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            let idx = seen;
            seen += 1;
            if idx < lead || idx >= tail_start {
                c
            } else {
                '*'
            }
        })
        .collect()
}

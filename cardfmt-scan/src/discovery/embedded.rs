//! Card numbers embedded in free text.
//!
//! A discovery regex finds runs of digit groups joined by single spaces or
//! dashes. Each run is split into its groups, and windows of consecutive
//! groups are validated, so a card next to a date or a quantity is still
//! found. The `regex` engine matches in linear time, and windows never span
//! more than 19 digits, so hostile input stays linear.

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use cardfmt::{MAX_DIGITS, ValidationResult, ValidatorConfig, mask, try_validate};
use regex::Regex;

use super::{FileFindings, column_of};
use crate::report::CardMatch;

/// Discovery regex: digit groups joined by single spaces or dashes.
static DIGIT_RUN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"\b[0-9]+(?:[ -][0-9]+)*\b") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid discovery regex: {err}"),
    }
});

/// Byte ranges of the digit groups in `run`.
fn digit_groups(run: &str) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = None;
    for (idx, b) in run.bytes().enumerate() {
        match (b.is_ascii_digit(), start) {
            (true, None) => start = Some(idx),
            (false, Some(first)) => {
                groups.push(first..idx);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(first) = start {
        groups.push(first..run.len());
    }
    groups
}

/// The longest window of `groups` starting at `first` that validates.
///
/// Returns the window's byte range in `run`, the index of its last group and
/// the validation result.
fn longest_valid_window(
    run: &str,
    groups: &[Range<usize>],
    first: usize,
    validator: &ValidatorConfig,
) -> Option<(Range<usize>, usize, ValidationResult)> {
    let start = groups.get(first)?.start;
    let mut digits = 0;
    let mut best = None;
    for (last, group) in groups.iter().enumerate().skip(first) {
        digits += group.len();
        if digits > MAX_DIGITS {
            break;
        }
        if let Ok(result) = try_validate(&run[start..group.end], validator) {
            best = Some((start..group.end, last, result));
        }
    }
    best
}

/// Find and validate card-number candidates anywhere in `content`.
///
/// Windows that fail validation are ordinary numbers (dates, phone numbers,
/// order ids) and are not reported. A valid window consumes its groups;
/// scanning resumes with the next group.
pub fn scan_embedded(content: &str, file: &Path, validator: &ValidatorConfig) -> FileFindings {
    let mut findings = FileFindings::default();

    for (idx, line) in content.lines().enumerate() {
        for run in DIGIT_RUN_PATTERN.find_iter(line) {
            let groups = digit_groups(run.as_str());
            let mut first = 0;
            while first < groups.len() {
                let Some((span, last, result)) =
                    longest_valid_window(run.as_str(), &groups, first, validator)
                else {
                    first += 1;
                    continue;
                };
                findings.matches.push(CardMatch::new(
                    file,
                    idx + 1,
                    column_of(line, run.start() + span.start),
                    mask(&result.normalized_digits),
                    result.network,
                ));
                first = last + 1;
            }
        }
    }

    findings
}

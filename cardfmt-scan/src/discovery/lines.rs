//! Line-delimited candidates: one card number per line.

use std::path::Path;

use cardfmt::{ValidatorConfig, mask, try_validate};

use super::{FileFindings, column_of, masked_excerpt};
use crate::error::Rejection;
use crate::report::CardMatch;

/// Lines starting with this marker (after trimming) are skipped.
pub const COMMENT_PREFIX: char = '#';

/// Validate every non-blank, non-comment line of `content` as one candidate.
///
/// Surrounding whitespace is trimmed; everything else on the line is part
/// of the candidate.
pub fn scan_lines(content: &str, file: &Path, validator: &ValidatorConfig) -> FileFindings {
    let mut findings = FileFindings::default();

    for (idx, raw_line) in content.lines().enumerate() {
        let candidate = raw_line.trim();
        if candidate.is_empty() || candidate.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let line = idx + 1;
        let column = column_of(raw_line, raw_line.len() - raw_line.trim_start().len());

        match try_validate(candidate, validator) {
            Ok(result) => findings.matches.push(CardMatch::new(
                file,
                line,
                column,
                mask(&result.normalized_digits),
                result.network,
            )),
            Err(err) => findings.rejections.push(Rejection::new(
                file,
                line,
                column,
                masked_excerpt(candidate, validator.max_input_len),
                err.to_string(),
            )),
        }
    }

    findings
}

//! Candidate discovery and validation for file content.
//!
//! - `lines`: one candidate per line, every failure reported
//! - `embedded`: digit runs found inside free text, only valid numbers reported

pub mod embedded;
pub mod lines;

use std::path::Path;

use cardfmt::mask;

use crate::config::{DiscoveryMode, ScanConfig};
use crate::error::Rejection;
use crate::report::CardMatch;

/// Matches and rejections found in one file.
#[derive(Debug, Default)]
pub struct FileFindings {
    pub matches: Vec<CardMatch>,
    pub rejections: Vec<Rejection>,
}

/// Scan `content` read from `file` according to `config.discovery_mode`.
pub fn scan_content(content: &str, file: &Path, config: &ScanConfig) -> FileFindings {
    match config.discovery_mode {
        DiscoveryMode::Lines => lines::scan_lines(content, file, &config.validator),
        DiscoveryMode::Embedded => embedded::scan_embedded(content, file, &config.validator),
    }
}

/// Mask `value` and cut it to at most `max_chars` characters for reporting.
fn masked_excerpt(value: &str, max_chars: usize) -> String {
    let masked = mask(value);
    if masked.chars().count() <= max_chars {
        return masked;
    }
    let mut out: String = masked.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// 1-based character column of byte offset `byte_idx` in `line`.
fn column_of(line: &str, byte_idx: usize) -> usize {
    line[..byte_idx].chars().count() + 1
}

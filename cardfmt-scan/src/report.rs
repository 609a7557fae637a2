//! Scan report types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cardfmt::Network;
use serde::Serialize;

use crate::error::{Rejection, ScanError};

/// Name used in network counts for valid numbers that matched no rule.
pub const UNKNOWN_NETWORK: &str = "unknown";

/// A candidate that validated as a card number.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct CardMatch {
    /// File the number came from.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column of the number's first character (1-indexed, in characters).
    pub column: usize,
    /// The normalized digits with the middle masked.
    pub masked_digits: String,
    /// The matched network; `None` for a well-formed number no rule claims.
    pub network: Option<Network>,
}

impl CardMatch {
    /// Create a match for the number at `line`:`column` of `file`.
    #[must_use]
    pub fn new(
        file: &Path,
        line: usize,
        column: usize,
        masked_digits: String,
        network: Option<Network>,
    ) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            column,
            masked_digits,
            network,
        }
    }

    /// Network name, or [`UNKNOWN_NETWORK`].
    #[must_use]
    pub fn network_name(&self) -> &'static str {
        self.network.map_or(UNKNOWN_NETWORK, Network::name)
    }

    /// Format as `{file}:{line}:{column}: {network} [{masked_digits}]`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!(
            "{}:{}:{}: {} [{}]",
            self.file.display(),
            self.line,
            self.column,
            self.network_name(),
            self.masked_digits
        )
    }
}

/// Result of a scan run.
///
/// Callers must check both `rejections` and `scan_errors`: a non-empty
/// `scan_errors` means some files were never looked at.
#[derive(Debug, Clone, Default, Serialize)]
#[non_exhaustive]
pub struct ScanReport {
    /// Number of files successfully read and scanned.
    pub scanned_files: usize,
    /// Number of files that could not be scanned.
    pub failed_files: usize,
    /// No rejections and no scan errors.
    pub ok: bool,
    /// Candidates that validated.
    pub matches: Vec<CardMatch>,
    /// Candidates that failed the structural check.
    pub rejections: Vec<Rejection>,
    /// Files that could not be read.
    pub scan_errors: Vec<ScanError>,
}

impl ScanReport {
    /// Total number of files attempted (scanned + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_files + self.failed_files
    }

    /// Number of rejected candidates.
    #[must_use]
    pub fn rejections_count(&self) -> usize {
        self.rejections.len()
    }

    /// Number of valid matches per network name.
    #[must_use]
    pub fn network_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.matches {
            *counts.entry(m.network_name()).or_insert(0) += 1;
        }
        counts
    }

    pub(crate) fn finish(mut self) -> Self {
        self.ok = self.rejections.is_empty() && self.scan_errors.is_empty();
        self
    }
}

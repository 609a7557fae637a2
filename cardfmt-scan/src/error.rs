//! Scan failures and rejected candidates.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// The kind of failure that prevented a file from being scanned.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The resolved path is outside the scan root (symlink escape).
    OutsideRoot,
    /// A resource limit (`max_files` or `max_total_bytes`) was reached.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A file that could not be scanned at all.
///
/// Distinct from [`Rejection`], which is a candidate that was read and found
/// malformed. A non-empty list of scan errors means coverage was incomplete.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Create a scan error for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [scan error] {}", self.file.display(), self.message)
    }
}

/// A candidate that failed the structural card-number check.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Rejection {
    /// File the candidate came from.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column of the candidate's first character (1-indexed, in characters).
    pub column: usize,
    /// The candidate with its middle digits masked.
    pub masked_value: String,
    /// Why the candidate was rejected.
    pub error: String,
}

impl Rejection {
    /// Create a rejection for the candidate at `line`:`column` of `file`.
    #[must_use]
    pub fn new(
        file: &Path,
        line: usize,
        column: usize,
        masked_value: String,
        error: String,
    ) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            column,
            masked_value,
            error,
        }
    }

    /// Format as `{file}:{line}:{column}: {error} [{masked_value}]`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!(
            "{}:{}:{}: {} [{}]",
            self.file.display(),
            self.line,
            self.column,
            self.error,
            self.masked_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rejection() {
        let rejection = Rejection::new(
            Path::new("data/cards.txt"),
            7,
            3,
            "4111-11**-****-1111".to_owned(),
            "mixed delimiters".to_owned(),
        );
        let formatted = rejection.format_human_readable();
        assert_eq!(
            formatted,
            "data/cards.txt:7:3: mixed delimiters [4111-11**-****-1111]"
        );
    }

    #[test]
    fn test_format_scan_error() {
        let err = ScanError::new(
            "data/big.txt",
            ScanErrorKind::FileTooLarge,
            "File exceeds maximum size of 10 bytes".to_owned(),
        );
        let formatted = err.format_human_readable();
        assert!(formatted.starts_with("data/big.txt: [scan error]"));
        assert!(formatted.contains("maximum size"));
    }
}

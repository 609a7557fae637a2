//! Configuration types for batch scanning.
//!
//! Split into scan config (how candidates are found and judged) and
//! source-specific config (which files are read), so the scanning core does
//! not depend on the filesystem.

use std::path::PathBuf;

use cardfmt::ValidatorConfig;

/// How card-number candidates are found in file content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiscoveryMode {
    /// Every non-blank line not starting with `#` is one candidate (default).
    /// Lines that fail validation are reported as rejections.
    #[default]
    Lines,
    /// Digit runs inside free text are candidates. Only candidates that
    /// validate are reported; the rest are treated as ordinary numbers.
    Embedded,
}

/// Core scan config; applies regardless of where content comes from.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Delimiter policy, classification mode and input cap for each candidate.
    pub validator: ValidatorConfig,
    /// Candidate discovery mode.
    pub discovery_mode: DiscoveryMode,
}

/// Filesystem-specific source options.
///
/// `paths` is required and must be non-empty.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Paths to scan (files or directories).
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the path and the file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum number of files to scan (default: `100_000`).
    pub max_files: usize,
    /// Maximum total bytes read across all files (default: 512 MB).
    pub max_total_bytes: u64,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
            max_total_bytes: 536_870_912,
        }
    }
}

impl FsSourceConfig {
    /// Default limits over the given paths.
    #[must_use]
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            ..Self::default()
        }
    }
}

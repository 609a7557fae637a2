//! Filesystem content source.
//!
//! Discovers files on disk and reads them for scanning:
//! - symlinks are not followed unless configured
//! - every file must resolve inside the root it was found under
//! - devices, pipes and sockets are skipped
//! - traversal depth and per-file size are bounded

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::FsSourceConfig;
use crate::error::{ScanError, ScanErrorKind};

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git", "vendor"];

/// File extensions that are scanned; everything else is ignored.
pub const SCANNABLE_EXTENSIONS: &[&str] = &["txt", "csv", "log", "md"];

fn compile_excludes(patterns: &[String], scan_errors: &mut Vec<ScanError>) -> Vec<Pattern> {
    let mut compiled = Vec::with_capacity(patterns.len());
    for raw in patterns {
        match Pattern::new(raw) {
            Ok(pattern) => compiled.push(pattern),
            Err(e) => scan_errors.push(ScanError::new(
                raw.as_str(),
                ScanErrorKind::InvalidExcludePattern,
                format!("Invalid exclude glob pattern '{raw}': {e}"),
            )),
        }
    }
    compiled
}

/// Whether the full path or the bare file name matches an exclude pattern.
fn is_excluded(path: &Path, excludes: &[Pattern]) -> bool {
    let full = path.to_string_lossy();
    let name = path.file_name().map(|n| n.to_string_lossy());
    excludes.iter().any(|pattern| {
        pattern.matches(&full) || name.as_deref().is_some_and(|n| pattern.matches(n))
    })
}

/// `WalkDir::filter_entry` predicate: `false` for directories in [`SKIP_DIRS`].
fn is_not_skip_dir(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

fn is_scannable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(unix)]
fn is_special_file(entry: &DirEntry) -> bool {
    use std::os::unix::fs::FileTypeExt;
    entry.metadata().is_ok_and(|m| {
        let ft = m.file_type();
        ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket()
    })
}

#[cfg(not(unix))]
fn is_special_file(_entry: &DirEntry) -> bool {
    false
}

/// Walk one directory root, pushing accepted files and any failures.
fn walk_root(
    root: &Path,
    canonical_root: &Path,
    config: &FsSourceConfig,
    excludes: &[Pattern],
    files: &mut Vec<PathBuf>,
    scan_errors: &mut Vec<ScanError>,
) {
    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(is_not_skip_dir);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(walk_err) => {
                let path = walk_err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                scan_errors.push(ScanError::new(
                    path,
                    ScanErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || is_special_file(&entry) || !is_scannable(path) {
            continue;
        }
        if is_excluded(path, excludes) {
            tracing::debug!(path = %path.display(), "excluded");
            continue;
        }

        match path.canonicalize() {
            Ok(resolved) if resolved.starts_with(canonical_root) => files.push(path.to_path_buf()),
            Ok(resolved) => scan_errors.push(ScanError::new(
                path,
                ScanErrorKind::OutsideRoot,
                format!(
                    "Path resolves outside scan root: {} -> {}",
                    path.display(),
                    resolved.display()
                ),
            )),
            Err(e) => scan_errors.push(ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to canonicalize path: {e}"),
            )),
        }
    }
}

/// Find all files to scan under the configured paths.
///
/// Returns `(files, scan_errors)`. Files are sorted and deduplicated. Walk
/// failures, boundary violations and bad exclude patterns are returned as
/// scan errors rather than dropped.
#[must_use]
pub fn find_files(config: &FsSourceConfig) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();
    let excludes = compile_excludes(&config.exclude, &mut scan_errors);

    for root in &config.paths {
        if root.is_file() {
            // Explicitly named files skip the extension filter.
            if !is_excluded(root, &excludes) {
                files.push(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            continue;
        }

        let canonical_root = match root.canonicalize() {
            Ok(r) => r,
            Err(e) => {
                scan_errors.push(ScanError::new(
                    root.as_path(),
                    ScanErrorKind::IoError,
                    format!("Failed to canonicalize root path: {e}"),
                ));
                continue;
            }
        };

        walk_root(
            root,
            &canonical_root,
            config,
            &excludes,
            &mut files,
            &mut scan_errors,
        );
    }

    files.sort();
    files.dedup();
    (files, scan_errors)
}

/// Read a file with a bounded read, enforcing `max_file_size`.
///
/// At most `max_file_size + 1` bytes are read, so an oversized file is
/// detected without loading it whole.
///
/// # Errors
/// Returns a [`ScanError`] if the file cannot be opened or read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(path, ScanErrorKind::IoError, format!("Failed to open file: {e}"))
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(path, ScanErrorKind::IoError, format!("Failed to read file: {e}"))
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        ScanError::new(
            path,
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )
    })
}

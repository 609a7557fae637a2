//! # cardfmt-scan
//!
//! Batch scanner that applies the `cardfmt` validator to card-number
//! candidates found in files, for data-cleaning jobs.
//!
//! The scanning core (`discovery`) does not know where content comes from;
//! the filesystem source (`strategy::fs`) finds and reads files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use cardfmt::DelimiterPolicy;
//! use cardfmt_scan::{FsSourceConfig, ScanConfig, scan_fs};
//!
//! let mut fs_config = FsSourceConfig::default();
//! fs_config.paths = vec![PathBuf::from("exports")];
//! fs_config.exclude = vec!["*.bak".to_owned()];
//!
//! let mut scan_config = ScanConfig::default();
//! scan_config.validator.policy = DelimiterPolicy::SpaceOrDash;
//!
//! let report = scan_fs(&fs_config, &scan_config).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Rejected: {}", report.rejections_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod discovery;
mod error;
pub mod output;
mod report;
mod strategy;

pub use config::{DiscoveryMode, FsSourceConfig, ScanConfig};
pub use error::{Rejection, ScanError, ScanErrorKind};
pub use report::{CardMatch, ScanReport, UNKNOWN_NETWORK};

use std::path::Path;

use strategy::fs::{find_files, read_file_bounded};

/// Scan files on disk for card-number candidates.
///
/// # Arguments
///
/// * `fs_config` - Which files to read, and the resource limits
/// * `scan_config` - Validator options and discovery mode
///
/// # Errors
///
/// Returns an error if `fs_config.paths` is empty or any path does not exist.
/// Unreadable files, oversized files and limit overruns are reported in
/// `report.scan_errors` instead.
pub fn scan_fs(fs_config: &FsSourceConfig, scan_config: &ScanConfig) -> anyhow::Result<ScanReport> {
    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided for scanning");
    }
    for path in &fs_config.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let (files, scan_errors) = find_files(fs_config);
    tracing::debug!(
        files = files.len(),
        discovery_errors = scan_errors.len(),
        "file discovery finished"
    );

    let mut report = ScanReport {
        failed_files: scan_errors.len(),
        scan_errors,
        ..ScanReport::default()
    };
    let mut total_bytes: u64 = 0;

    for file in &files {
        if report.files_attempted() >= fs_config.max_files {
            record_limit(
                &mut report,
                file,
                format!(
                    "Scan aborted: max_files limit ({}) reached; remaining files not scanned",
                    fs_config.max_files
                ),
            );
            break;
        }

        let content = match read_file_bounded(file, fs_config.max_file_size) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %err.file.display(), kind = ?err.kind, "{}", err.message);
                report.scan_errors.push(err);
                report.failed_files += 1;
                continue;
            }
        };

        total_bytes = total_bytes.saturating_add(content.len() as u64);
        if total_bytes > fs_config.max_total_bytes {
            record_limit(
                &mut report,
                file,
                format!(
                    "Scan aborted: max_total_bytes limit ({}) reached; remaining files not scanned",
                    fs_config.max_total_bytes
                ),
            );
            break;
        }

        let findings = discovery::scan_content(&content, file, scan_config);
        tracing::debug!(
            path = %file.display(),
            matches = findings.matches.len(),
            rejections = findings.rejections.len(),
            "file scanned"
        );
        report.scanned_files += 1;
        report.matches.extend(findings.matches);
        report.rejections.extend(findings.rejections);
    }

    Ok(report.finish())
}

fn record_limit(report: &mut ScanReport, file: &Path, message: String) {
    tracing::warn!(path = %file.display(), "{message}");
    report
        .scan_errors
        .push(ScanError::new(file, ScanErrorKind::LimitExceeded, message));
    report.failed_files += 1;
}

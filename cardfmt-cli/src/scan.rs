//! `cardfmt scan`: batch-scan files for card numbers.

use std::io::Write;

use cardfmt_scan::output::{write_human, write_json};
use cardfmt_scan::{DiscoveryMode, FsSourceConfig, ScanConfig, scan_fs};
use colored::Colorize;

use crate::cli::ScanArgs;

fn configs(args: &ScanArgs) -> (FsSourceConfig, ScanConfig) {
    let mut fs_config = FsSourceConfig::with_paths(args.paths.clone());
    fs_config.exclude.clone_from(&args.exclude);
    fs_config.max_file_size = args.max_file_size;
    fs_config.follow_links = args.follow_links;

    let mut scan_config = ScanConfig::default();
    scan_config.validator = args.validator.config();
    scan_config.discovery_mode = if args.embedded {
        DiscoveryMode::Embedded
    } else {
        DiscoveryMode::Lines
    };
    (fs_config, scan_config)
}

/// Run `scan`. Returns `Ok(false)` if anything was rejected or left unscanned.
///
/// # Errors
///
/// Returns an error if a path does not exist or writing the report fails.
pub fn run(args: &ScanArgs, writer: &mut dyn Write) -> anyhow::Result<bool> {
    let (fs_config, scan_config) = configs(args);
    let report = scan_fs(&fs_config, &scan_config)?;

    tracing::info!(
        scanned = report.scanned_files,
        failed = report.failed_files,
        matches = report.matches.len(),
        rejections = report.rejections_count(),
        "scan finished"
    );

    if args.json {
        write_json(&report, writer)?;
    } else {
        write_human(&report, writer)?;
        let verdict = if report.ok {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        writeln!(writer, "{verdict}")?;
    }
    Ok(report.ok)
}

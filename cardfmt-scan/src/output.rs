//! JSON and plain-text rendering of a [`ScanReport`].
//!
//! Terminal colours are left to the CLI.

use std::io::Write;

use crate::report::ScanReport;

const RULE_WIDTH: usize = 80;

/// Write `report` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ScanReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write `report` as human-readable plain text.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ScanReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(writer)?;
    writeln!(writer, "{heavy}")?;
    writeln!(writer, "  CARD NUMBER SCAN")?;
    writeln!(writer, "{heavy}")?;
    writeln!(writer)?;
    writeln!(writer, "  Files scanned:  {}", report.scanned_files)?;
    writeln!(writer, "  Files failed:   {}", report.failed_files)?;
    writeln!(writer, "  Valid numbers:  {}", report.matches.len())?;
    writeln!(writer, "  Rejected:       {}", report.rejections_count())?;
    for (network, count) in report.network_counts() {
        writeln!(writer, "    {network:<18}{count}")?;
    }
    writeln!(writer)?;

    if !report.scan_errors.is_empty() {
        writeln!(writer, "{light}")?;
        writeln!(writer, "  SCAN ERRORS (files that could not be scanned)")?;
        writeln!(writer, "{light}")?;
        for err in &report.scan_errors {
            writeln!(writer, "{}", err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.rejections.is_empty() {
        writeln!(writer, "{light}")?;
        writeln!(writer, "  REJECTED CANDIDATES")?;
        writeln!(writer, "{light}")?;
        for rejection in &report.rejections {
            writeln!(writer, "{}", rejection.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{heavy}")?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All candidates in {} file(s) are well-formed",
            report.scanned_files
        )?;
    } else {
        if !report.scan_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} file(s) could not be scanned",
                report.failed_files
            )?;
        }
        if !report.rejections.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} malformed card number(s) found",
                report.rejections_count()
            )?;
        }
    }
    writeln!(writer, "{heavy}")?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::Rejection;
    use crate::report::CardMatch;
    use cardfmt::Network;
    use std::path::Path;

    fn sample_report() -> ScanReport {
        ScanReport {
            scanned_files: 2,
            matches: vec![CardMatch::new(
                Path::new("cards.txt"),
                1,
                1,
                "411111******1111".to_owned(),
                Some(Network::Visa),
            )],
            rejections: vec![Rejection::new(
                Path::new("cards.txt"),
                2,
                1,
                "4111-11** ****-1111".to_owned(),
                "mixed delimiters".to_owned(),
            )],
            ..ScanReport::default()
        }
        .finish()
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&sample_report(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["scanned_files"], 2);
        assert_eq!(value["matches"][0]["network"], "Visa");
        assert_eq!(value["matches"][0]["masked_digits"], "411111******1111");
        assert_eq!(value["rejections"][0]["line"], 2);
    }

    #[test]
    fn test_write_human_lists_rejections() {
        let mut out = Vec::new();
        write_human(&sample_report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CARD NUMBER SCAN"));
        assert!(text.contains("REJECTED CANDIDATES"));
        assert!(text.contains("cards.txt:2:1: mixed delimiters"));
        assert!(text.contains("Visa"));
        assert!(text.contains("1 malformed card number(s) found"));
        assert!(!text.contains("4111111111111111"));
    }

    #[test]
    fn test_write_human_ok() {
        let mut out = Vec::new();
        let report = ScanReport {
            scanned_files: 3,
            ..ScanReport::default()
        }
        .finish();
        write_human(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("All candidates in 3 file(s) are well-formed"));
    }
}

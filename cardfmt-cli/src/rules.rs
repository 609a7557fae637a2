//! `cardfmt rules`: print the network rule table in priority order.

use std::io::Write;

use cardfmt::{NetworkRule, RULES};
use serde::Serialize;

use crate::cli::RulesArgs;

#[derive(Debug, Serialize)]
struct RuleRow {
    priority: usize,
    label: &'static str,
    network: &'static str,
    prefixes: Vec<String>,
    lengths: &'static [usize],
    fallback: bool,
}

impl RuleRow {
    fn new(priority: usize, rule: &NetworkRule) -> Self {
        Self {
            priority,
            label: rule.label,
            network: rule.name(),
            prefixes: rule.prefixes.iter().map(ToString::to_string).collect(),
            lengths: rule.lengths,
            fallback: rule.is_fallback(),
        }
    }
}

/// Render allowed lengths, collapsing consecutive runs: `[13, 16]` is
/// `13, 16` and `[16, 17, 18, 19]` is `16-19`.
#[must_use]
pub fn format_lengths(lengths: &[usize]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut iter = lengths.iter().copied().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if end == start {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{end}"));
        }
    }
    parts.join(", ")
}

/// Write the rule table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn run(args: &RulesArgs, writer: &mut dyn Write) -> anyhow::Result<()> {
    let rows: Vec<RuleRow> = RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| RuleRow::new(i + 1, rule))
        .collect();

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<4}{:<20}{:<18}{:<28}LENGTHS",
        "#", "RULE", "NETWORK", "PREFIXES"
    )?;
    for row in &rows {
        let label = if row.fallback {
            format!("{} *", row.label)
        } else {
            row.label.to_owned()
        };
        writeln!(
            writer,
            "{:<4}{:<20}{:<18}{:<28}{}",
            row.priority,
            label,
            row.network,
            row.prefixes.join(", "),
            format_lengths(row.lengths)
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "* not consulted with --strict")?;
    Ok(())
}

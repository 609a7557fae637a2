//! `cardfmt check`: validate card numbers given on the command line.

use std::io::Write;

use cardfmt::{Network, ValidatorConfig, group_digits, mask, try_validate};
use colored::Colorize;
use serde::Serialize;

use crate::cli::CheckArgs;

/// Characters of a rejected input echoed back, after masking.
const MAX_ECHO_CHARS: usize = 40;

/// Result for one command-line input. Digits are always masked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The input, masked and escaped for display.
    pub input: String,
    /// Whether the input is a well-formed card number.
    pub is_valid: bool,
    /// Matched network; `None` when invalid or unclaimed in strict mode.
    pub network: Option<Network>,
    /// Masked digits in the policy's canonical grouping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_digits: Option<String>,
    /// Why the input was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check one input.
#[must_use]
pub fn check_input(input: &str, config: &ValidatorConfig) -> CheckOutcome {
    let echoed = echo(input);
    match try_validate(input, config) {
        Ok(result) => CheckOutcome {
            input: echoed,
            is_valid: result.is_valid,
            network: result.network,
            masked_digits: Some(mask(&group_digits(&result.normalized_digits, config.policy))),
            error: None,
        },
        Err(err) => CheckOutcome {
            input: echoed,
            is_valid: false,
            network: None,
            masked_digits: None,
            error: Some(err.to_string()),
        },
    }
}

fn echo(input: &str) -> String {
    let masked = mask(input);
    let mut out: String = masked
        .chars()
        .take(MAX_ECHO_CHARS)
        .flat_map(char::escape_default)
        .collect();
    if masked.chars().count() > MAX_ECHO_CHARS {
        out.push_str("...");
    }
    out
}

/// Run `check` over every input. Returns `Ok(false)` if any input is invalid.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run(args: &CheckArgs, writer: &mut dyn Write) -> anyhow::Result<bool> {
    let config = args.validator.config();
    let outcomes: Vec<CheckOutcome> = args
        .inputs
        .iter()
        .map(|input| check_input(input, &config))
        .collect();
    let all_valid = outcomes.iter().all(|o| o.is_valid);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&outcomes)?)?;
    } else {
        for outcome in &outcomes {
            write_outcome(outcome, writer)?;
        }
    }

    tracing::info!(
        inputs = outcomes.len(),
        invalid = outcomes.iter().filter(|o| !o.is_valid).count(),
        policy = %config.policy,
        "check finished"
    );
    Ok(all_valid)
}

fn write_outcome(outcome: &CheckOutcome, writer: &mut dyn Write) -> anyhow::Result<()> {
    if outcome.is_valid {
        let network = outcome.network.map_or("unknown", Network::name);
        writeln!(
            writer,
            "{} {}  {}",
            "\u{2713}".green(),
            outcome.masked_digits.as_deref().unwrap_or_default(),
            network
        )?;
    } else {
        writeln!(
            writer,
            "{} \"{}\"  {}",
            "\u{2717}".red(),
            outcome.input,
            outcome.error.as_deref().unwrap_or("invalid")
        )?;
    }
    Ok(())
}

//! Argument definitions and command dispatch.

use std::io::Write;
use std::path::PathBuf;

use cardfmt::{ClassificationMode, DelimiterPolicy, MAX_INPUT_LEN, ValidatorConfig};
use cardfmt_scan::FsSourceConfig;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::{check, logging, rules, scan};

#[derive(Debug, Parser)]
#[command(
    name = "cardfmt",
    author,
    version,
    about = "Check the format of payment-card numbers",
    long_about = None
)]
pub struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides it
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate card numbers given as arguments
    Check(CheckArgs),
    /// Scan files and directories for card numbers
    Scan(ScanArgs),
    /// Print the network rule table
    Rules(RulesArgs),
}

impl Command {
    /// Subcommand name for logs. Never includes arguments.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check(_) => "check",
            Self::Scan(_) => "scan",
            Self::Rules(_) => "rules",
        }
    }
}

/// Options shared by every command that validates input.
#[derive(Debug, Clone, Args)]
pub struct ValidatorArgs {
    /// Separators allowed between 4-digit groups: none, space, dash, space-or-dash
    #[arg(short, long, value_name = "POLICY", default_value_t = DelimiterPolicy::None)]
    pub policy: DelimiterPolicy,

    /// Skip the generic fallback rule, so numbers no network claims report no network
    #[arg(long)]
    pub strict: bool,

    /// Reject inputs longer than this many bytes without parsing them
    #[arg(long, value_name = "BYTES", default_value_t = MAX_INPUT_LEN)]
    pub max_input_len: usize,
}

impl ValidatorArgs {
    /// The validator options these arguments describe.
    #[must_use]
    pub fn config(&self) -> ValidatorConfig {
        let mode = if self.strict {
            ClassificationMode::Strict
        } else {
            ClassificationMode::Lenient
        };
        ValidatorConfig::new(self.policy)
            .with_mode(mode)
            .with_max_input_len(self.max_input_len)
    }
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Card numbers to check; quote numbers that contain spaces
    #[arg(required = true, value_name = "INPUT", allow_hyphen_values = true)]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub validator: ValidatorArgs,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Glob patterns to skip, matched against the path and the file name
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub validator: ValidatorArgs,

    /// Look for numbers inside free text instead of treating each line as one candidate
    #[arg(long)]
    pub embedded: bool,

    /// Skip files larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = FsSourceConfig::default().max_file_size)]
    pub max_file_size: u64,

    /// Follow symbolic links (targets must stay inside the scanned directory)
    #[arg(long)]
    pub follow_links: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RulesArgs {
    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse arguments, set up logging and run the selected command on stdout.
///
/// Returns `Ok(false)` when the command completed but found invalid input.
///
/// # Errors
///
/// Returns an error if the command could not run, for example because a scan
/// path does not exist.
pub fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(command = cli.command.name(), "starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Run the parsed command, writing its output to `writer`.
///
/// # Errors
///
/// Returns an error if the command could not run or writing fails.
pub fn execute(cli: &Cli, writer: &mut dyn Write) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Check(args) => check::run(args, writer),
        Command::Scan(args) => scan::run(args, writer),
        Command::Rules(args) => {
            rules::run(args, writer)?;
            Ok(true)
        }
    }
}

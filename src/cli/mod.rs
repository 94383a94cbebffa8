//! CLI argument parsing for paralix.
//!
//! Uses clap derive macros for declarative argument definitions.
//! The handlers live in the `commands` module.

use clap::{Parser, Subcommand};
use paralix::config::ReportOrder;
use paralix::exit_codes;
use std::path::PathBuf;

/// Paralix: run a command with N values in parallel.
///
/// The command template names a placeholder as `<KEY>`. Each value supplied
/// for KEY runs the command once, concurrently, and all output is merged into
/// one report ordered by value.
#[derive(Parser, Debug)]
#[command(name = "paralix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not echo the report to stdout.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a YAML config file (default: ./paralix.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for paralix.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command with N args in parallel.
    ///
    /// Values come from exactly one of --placeholder or --inputfile.
    #[command(name = "command", alias = "run")]
    Run(RunArgs),

    /// List the placeholders of a command template without running it.
    Placeholders(PlaceholdersArgs),
}

/// Arguments for the `command` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Command to execute with placeholders, e.g. 'echo <WHAT_SHOULD_ECHO>'.
    #[arg(short, long = "execute")]
    pub execute: String,

    /// Inline values as 'KEY={VALUE1,VALUE2,VALUE3}'.
    #[arg(short, long = "placeholder")]
    pub placeholder: Option<String>,

    /// File with one value per line; its base name is the placeholder key.
    #[arg(short = 'f', long = "inputfile")]
    pub inputfile: Option<PathBuf>,

    /// File the merged report is written to.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Directory for per-value output while the run is in flight (overrides config).
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Section ordering: 'label' (sorted by value) or 'input' (source order).
    #[arg(long, value_parser = parse_report_order)]
    pub order: Option<ReportOrder>,

    /// Print the run summary as JSON instead of a status line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `placeholders` subcommand.
#[derive(Parser, Debug)]
pub struct PlaceholdersArgs {
    /// Command template to inspect.
    #[arg(short, long = "execute")]
    pub execute: String,
}

fn parse_report_order(s: &str) -> Result<ReportOrder, String> {
    ReportOrder::from_str(s).ok_or_else(|| format!("expected 'label' or 'input', got '{}'", s))
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Usage errors exit with `USER_ERROR` instead of clap's default of 2,
    /// which paralix reserves for unit failures.
    pub fn parse_args() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) => {
                let code = if e.use_stderr() {
                    exit_codes::USER_ERROR
                } else {
                    exit_codes::SUCCESS
                };
                let _ = e.print();
                std::process::exit(code);
            }
        }
    }
}

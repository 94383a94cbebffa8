//! Paralix: run a command with N values in parallel.
//!
//! This is the main entry point for the `paralix` CLI. It parses arguments,
//! sets up logging and config, dispatches to the command handler, and maps
//! errors to exit codes.

mod cli;
mod commands;

use cli::Cli;
use paralix::config::Config;
use paralix::{exit_codes, logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    logging::init_cli_logger(cli.verbose);

    let result = match Config::discover(cli.config.as_deref()) {
        Ok(config) => {
            let ctx = commands::Context {
                config,
                quiet: cli.quiet,
            };
            commands::dispatch(cli.command, ctx).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

//! Command implementations for paralix.
//!
//! Routes each parsed CLI command to its handler.

mod placeholders;
mod run;

use crate::cli::Command;
use paralix::config::Config;
use paralix::error::Result;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub quiet: bool,
}

/// Dispatch a command to its implementation.
pub async fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args, &ctx).await,
        Command::Placeholders(args) => placeholders::cmd_placeholders(args),
    }
}

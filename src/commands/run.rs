//! Implementation of the `paralix command` command.

use super::Context;
use crate::cli::RunArgs;
use paralix::error::{ParalixError, Result};
use paralix::orchestrator::{Orchestrator, RunRequest, RunSummary};
use paralix::sink::ScratchDirSink;
use std::io::Write;
use tracing::info;

/// Execute the `paralix command` command.
///
/// 1. Resolves config overrides (scratch dir, order)
/// 2. Runs the pipeline against a scratch-directory sink
/// 3. Echoes the report unless quiet or `--json`
/// 4. Prints each unit failure and the status line (or the JSON summary)
/// 5. Fails with `UnitsFailed` if any unit failed
pub async fn cmd_run(args: RunArgs, ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let scratch_dir = args
        .scratch_dir
        .unwrap_or_else(|| config.scratch_dir.clone());

    let request = RunRequest {
        template: args.execute,
        inline_spec: args.placeholder,
        input_file: args.inputfile,
        output: args.output,
        shell: config.shell()?,
        report_order: args.order.unwrap_or(config.report_order),
    };

    let mut orchestrator = Orchestrator::new(request, ScratchDirSink::new(scratch_dir));
    let summary = orchestrator.run().await?;

    if config.echo_report && !ctx.quiet && !args.json {
        info!("printing the content of file {}", summary.report_path.display());
        echo_report(&summary)?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| ParalixError::Io {
            context: "failed to serialize run summary".to_string(),
            source: std::io::Error::other(e),
        })?;
        println!("{}", json);
    } else {
        for failure in &summary.failures {
            eprintln!("Error: {}", failure.reason);
        }
        eprintln!("{}", summary.status_line());
    }

    summary.check()
}

fn echo_report(summary: &RunSummary) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&summary.report.render())
        .and_then(|()| stdout.flush())
        .map_err(|e| ParalixError::Io {
            context: "failed to echo report to stdout".to_string(),
            source: e,
        })
}

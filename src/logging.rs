//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so the report echoed on stdout can be piped cleanly.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "paralix=debug,info" } else { "paralix=info" }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

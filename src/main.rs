use std::process::ExitCode;

use clap::Parser;
use csscrub::cli::{Arguments, ExitStatus};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "CSSCRUB_LOG";

fn main() -> ExitCode {
    let args = Arguments::parse();
    setup_logging(args.verbose());

    match csscrub::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_directive = if verbose { "csscrub=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // stdout is reserved for reports and `strip -` output
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!("logging initialized");
}

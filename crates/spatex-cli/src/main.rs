//! Spatex CLI entry point.

use std::{
    io::{self, IsTerminal},
    process,
    str::FromStr,
};

use clap::Parser;
use log::{LevelFilter, debug, info};

use spatex_cli::{Args, error_adapter::render_report};

/// Install env_logger at `level`, falling back to `warn` when it is not a
/// level name.
fn init_logging(level: &str) -> LevelFilter {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    log_level
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logging(&args.log_level);

    info!(log_level:?; "Starting Spatex");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = spatex_cli::run(&args) {
        // Diagnostics go straight to stderr so `--log-level off` still shows them.
        match render_report(&err, io::stderr().is_terminal()) {
            Ok(report) => eprint!("{report}"),
            Err(_) => eprintln!("error: {err}"),
        }
        process::exit(1);
    }

    info!("Completed successfully");
}

//! Command-line argument definitions for the Spatex CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, parse mode, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Spatex scene compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input Spatex file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file; standard output if omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Reject stray tokens instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

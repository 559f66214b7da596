//! CLI logic for the Spatex scene compiler.
//!
//! This module contains the core CLI logic for the Spatex scene compiler.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write};

use log::info;

use spatex::{Compiler, SpatexError};

/// Run the Spatex CLI application
///
/// This function compiles the input file to a scene tree and writes it as
/// JSON to the output file, or to standard output when none is given.
///
/// # Errors
///
/// Returns `SpatexError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Syntax errors
/// - JSON export errors
pub fn run(args: &Args) -> Result<(), SpatexError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref(), args.strict)?;

    let source = fs::read_to_string(&args.input)?;

    let compiler = Compiler::new(app_config);
    let json = compiler.compile(&source)?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output_file = path; "Scene exported successfully");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

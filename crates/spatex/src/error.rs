//! Error types for Spatex operations.
//!
//! This module provides the main error type [`SpatexError`] which wraps
//! the error conditions that can occur while compiling a scene.

use std::io;

use thiserror::Error;

use spatex_parser::SyntaxError;

/// The main error type for Spatex operations.
///
/// The `Parse` variant keeps the source text next to the [`SyntaxError`] so
/// callers can point at the offending span.
#[derive(Debug, Error)]
pub enum SpatexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: SyntaxError, src: String },

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpatexError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: SyntaxError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

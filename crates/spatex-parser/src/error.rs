//! Error types for the Spatex parser.
//!
//! Parsing fails fast: the first grammar violation aborts with a single
//! [`SyntaxError`]. Each error carries an [`ErrorCode`] for documentation
//! and searchability, the token index where it happened, and a byte span
//! for pointing at the source.
//!
//! Unresolved connector references and unknown shape types are not errors;
//! the builder passes them through.

mod error_code;
mod syntax_error;

pub use error_code::ErrorCode;
pub use syntax_error::{Expected, Found, SyntaxError};

/// A type alias for `Result<T, SyntaxError>`.
pub type Result<T> = std::result::Result<T, SyntaxError>;

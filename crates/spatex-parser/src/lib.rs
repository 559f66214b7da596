//! # Spatex Parser
//!
//! Tokenizer, parser and scene-tree builder for the Spatex 3D diagram
//! language. This crate turns source text into the normalized
//! [`Scene`] defined in `spatex-core`.
//!
//! ## Usage
//!
//! ```
//! # use spatex_parser::{parse, SyntaxError};
//!
//! fn main() -> Result<(), SyntaxError> {
//!     let source = r#"
//!         scene {
//!             cube a { pos: 0 0 0; }
//!             sphere b { pos: 3 0 0; radius: 0.5; }
//!             arrow { from: a; to: b; label: "link"; }
//!         }
//!     "#;
//!
//!     let scene = parse(source)?;
//!     assert_eq!(scene.connectors[0].to.pos, [3.0, 0.0, 0.0]);
//!     Ok(())
//! }
//! ```

mod builder;
mod error;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod span;
mod tokens;

pub use builder::{Registry, build, resolve_ref};
pub use error::{ErrorCode, Expected, Found, SyntaxError};
pub use lexer::tokenize;
pub use parser::{ParseConfig, ParseMode, build_document};
pub use parser_types::ParseNode;
pub use span::Span;
pub use tokens::{PositionedToken, Token, TokenKind};

use log::debug;

use spatex_core::scene::Scene;

/// Parse source text into a scene tree with the default configuration.
///
/// See [`parse_with`].
pub fn parse(source: &str) -> Result<Scene, SyntaxError> {
    parse_with(source, &ParseConfig::default())
}

/// Parse source text into a scene tree.
///
/// This runs the complete pipeline:
///
/// 1. **Tokenize** - Convert source text to tokens; never fails
/// 2. **Parse** - Build the untyped parse tree from tokens
/// 3. **Build** - Apply defaults and resolve connector endpoints
///
/// Only the parse step can fail. Each call is independent: no state is
/// shared between calls, so the same input always gives the same scene.
///
/// # Example
///
/// ```
/// # use spatex_parser::{parse_with, ParseConfig, ParseMode};
///
/// let config = ParseConfig::new(ParseMode::Strict);
/// assert!(parse_with("scene { 42 }", &config).is_err());
/// assert!(parse_with("scene { 42 }", &ParseConfig::default()).is_ok());
/// ```
pub fn parse_with(source: &str, config: &ParseConfig) -> Result<Scene, SyntaxError> {
    let document = parse_tree(source, config)?;
    Ok(build(&document))
}

/// Tokenize and parse source text, stopping before the scene tree is built.
pub fn parse_tree(source: &str, config: &ParseConfig) -> Result<ParseNode, SyntaxError> {
    let tokens = tokenize(source);
    debug!(count = tokens.len(), mode:? = config.mode; "Tokenized source");
    build_document(&tokens, config)
}

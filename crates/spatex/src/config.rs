//! Configuration types for Spatex compilation.
//!
//! This module provides configuration structures that control how source is
//! parsed and how the scene tree is written out. All types implement
//! [`serde::Deserialize`] for loading from external sources. Unknown
//! sections and keys are rejected, so a misspelled `[parsre]` or `strict =
//! true` fails loudly instead of silently keeping tolerant parsing.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining parser and output settings.
//! - [`ParserConfig`] - Controls the [`ParseMode`] used for recovery from stray tokens.
//! - [`OutputConfig`] - Controls JSON formatting.
//!
//! # Example
//!
//! ```
//! # use spatex::config::AppConfig;
//! # use spatex::ParseMode;
//! let config = AppConfig::default();
//! assert_eq!(config.parser().mode(), ParseMode::Tolerant);
//! assert!(config.output().pretty());
//! ```

use serde::Deserialize;

use spatex_parser::{ParseConfig, ParseMode};

/// Top-level application configuration combining parser and output
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified parser and output configurations.
    pub fn new(parser: ParserConfig, output: OutputConfig) -> Self {
        Self { parser, output }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Force strict parsing, whatever the loaded configuration says.
    pub fn with_strict(mut self) -> Self {
        self.parser.mode = ParseMode::Strict;
        self
    }
}

/// Parser settings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// How stray tokens are handled.
    #[serde(default)]
    mode: ParseMode,
}

impl ParserConfig {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// Returns the [`ParseMode`].
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// The configuration handed to the parser.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new(self.mode)
    }
}

/// Output settings for the exported scene tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Indent the JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns whether JSON output is indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

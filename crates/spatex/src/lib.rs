//! Spatex - A CSS-like language for describing 3D diagram scenes.
//!
//! Parsing and scene-tree construction for the Spatex language, plus JSON
//! export of the resulting [`Scene`](scene::Scene) for renderers.

pub mod config;

mod error;

pub use spatex_core::{catalog, scene, value, vector};
pub use spatex_parser::{
    ErrorCode, ParseMode, Span, SyntaxError, Token, TokenKind, tokenize,
};

pub use error::SpatexError;

use log::{debug, info, trace};

use config::AppConfig;

/// Compiler from Spatex source to a scene tree.
///
/// # Examples
///
/// ```rust
/// use spatex::{Compiler, config::AppConfig};
///
/// let source = "scene { cube a { } sphere b { pos: 2 0 0; } line { from: a; to: b; } }";
///
/// let compiler = Compiler::new(AppConfig::default());
///
/// // Parse source to the scene tree
/// let scene = compiler.parse(source)
///     .expect("Failed to parse");
/// assert_eq!(scene.connectors[0].to.pos, [2.0, 0.0, 0.0]);
///
/// // Write the scene tree out as JSON
/// let json = compiler.to_json(&scene)
///     .expect("Failed to export");
/// assert!(json.contains("\"type\": \"scene\""));
/// ```
#[derive(Default)]
pub struct Compiler {
    config: AppConfig,
}

impl Compiler {
    /// Create a new compiler with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this compiler was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source code into a scene tree.
    ///
    /// This performs tokenizing, parsing and scene-tree building with the
    /// configured parse mode.
    ///
    /// # Errors
    ///
    /// Returns `SpatexError::Parse` for syntax errors. Unresolved connector
    /// references and unknown shape types are not errors.
    pub fn parse(&self, source: &str) -> Result<scene::Scene, SpatexError> {
        info!(mode:? = self.config.parser().mode(); "Parsing scene");

        let scene = spatex_parser::parse_with(source, &self.config.parser().parse_config())
            .map_err(|err| SpatexError::new_parse_error(err, source))?;

        debug!(
            objects = scene.objects.len(),
            connectors = scene.connectors.len();
            "Scene parsed successfully"
        );
        trace!(scene:?; "Parsed scene");

        Ok(scene)
    }

    /// Serialize a scene tree to JSON.
    ///
    /// Output is indented unless the configuration turns it off.
    ///
    /// # Errors
    ///
    /// Returns `SpatexError::Export` if serialization fails.
    pub fn to_json(&self, scene: &scene::Scene) -> Result<String, SpatexError> {
        info!(pretty = self.config.output().pretty(); "Exporting scene as JSON");

        let json = if self.config.output().pretty() {
            serde_json::to_string_pretty(scene)?
        } else {
            serde_json::to_string(scene)?
        };

        debug!(bytes = json.len(); "Scene exported");
        Ok(json)
    }

    /// Parse source and export the scene tree in one step.
    pub fn compile(&self, source: &str) -> Result<String, SpatexError> {
        let scene = self.parse(source)?;
        self.to_json(&scene)
    }
}

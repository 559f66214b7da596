//! The untyped parse tree.
//!
//! The parser knows nothing about shapes, groups or connectors: every block
//! becomes a [`ParseNode`] with a type tag, an optional name, its properties
//! in source order and its nested blocks. Interpreting the tags is the
//! builder's job.

use indexmap::IndexMap;

use spatex_core::value::Value;

use crate::span::Span;

/// A block in the parse tree: `type [name] { ... }`.
///
/// The document root is a node with type `scene` and no name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub node_type: String,
    pub name: Option<String>,
    /// Declared properties. A key declared twice keeps its first position and
    /// its last value.
    pub properties: IndexMap<String, Value>,
    pub children: Vec<ParseNode>,
    /// Source range from the type word to the closing brace.
    pub span: Span,
}

impl ParseNode {
    /// Create an empty node.
    pub fn new(node_type: impl Into<String>, name: Option<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name,
            properties: IndexMap::new(),
            children: Vec::new(),
            span: Span::default(),
        }
    }

    /// Look up a declared property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

//! Attribute values.
//!
//! A [`Value`] is what a property declaration carries on the right-hand side
//! of its colon. The parser produces them untyped; each point of use in the
//! scene builder coerces them explicitly through the accessors below.

use std::fmt;

use serde::Serialize;

/// A property value as written in source.
///
/// Serializes untagged, so a value appears in JSON as the plain string,
/// number, boolean or array it represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A quoted string literal, escapes already applied.
    Str(String),
    /// A `#`-prefixed color literal, kept verbatim including the `#`.
    HexColor(String),
    /// The words `true` or `false`.
    Bool(bool),
    /// A single number.
    Num(f64),
    /// Two or more numbers written in a row, in source order.
    Vec(Vec<f64>),
    /// Any other bare word, e.g. `left` in `align: left`.
    Ident(String),
}

impl Value {
    /// Returns the number if this is a [`Value::Num`].
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text of any textual variant.
    ///
    /// Strings, hex colors and bare identifiers all count as text; this is
    /// how `color`, `label` and entity references are read.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::HexColor(s) | Value::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, for log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::HexColor(_) => "hex color",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Vec(_) => "number vector",
            Value::Ident(_) => "identifier",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::HexColor(s) | Value::Ident(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Vec(items) => {
                for (i, n) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{n}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::Vec(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textual_variants_read_as_text() {
        assert_eq!(Value::Str("a b".into()).as_text(), Some("a b"));
        assert_eq!(Value::HexColor("#fff".into()).as_text(), Some("#fff"));
        assert_eq!(Value::Ident("left".into()).as_text(), Some("left"));
        assert_eq!(Value::Num(1.0).as_text(), None);
        assert_eq!(Value::Bool(true).as_text(), None);
    }

    #[test]
    fn test_numeric_and_bool_accessors() {
        assert_eq!(Value::Num(2.5).as_num(), Some(2.5));
        assert_eq!(Value::Vec(vec![1.0, 2.0]).as_num(), None);
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::Ident("false".into()).as_bool(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Vec(vec![1.0, 2.5, -3.0]).to_string(), "1 2.5 -3");
        assert_eq!(Value::Str("hi".into()).to_string(), "\"hi\"");
        assert_eq!(Value::HexColor("#abc".into()).to_string(), "#abc");
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Str("s".into()),
            Value::HexColor("#123".into()),
            Value::Bool(true),
            Value::Num(1.5),
            Value::Vec(vec![1.0, 2.0]),
            Value::Ident("left".into()),
        ])
        .unwrap();
        assert_eq!(json, r##"["s","#123",true,1.5,[1.0,2.0],"left"]"##);
    }
}

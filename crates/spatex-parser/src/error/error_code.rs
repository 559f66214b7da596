//! Error codes for the Spatex diagnostic system.
//!
//! All codes are parser errors (`E1xx`); the tokenizer and the builder
//! have no failure path.

use std::fmt;

/// Error codes for categorizing syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unexpected token.
    ///
    /// The parser encountered a token it did not expect at this position.
    E100,

    /// Unexpected end of input.
    ///
    /// The input ended before a complete construct was parsed, most often a
    /// block missing its closing brace.
    E101,

    /// Missing scene header.
    ///
    /// A document must start with the word `scene` followed by a block.
    E102,

    /// Unrecognized construct.
    ///
    /// Strict mode only: a token inside a block that starts neither a
    /// property nor a child block, or anything after the closing brace of
    /// the document.
    E103,

    /// Nesting too deep.
    ///
    /// Child blocks are nested more deeply than the parser accepts.
    E104,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E102 => "missing scene header",
            ErrorCode::E103 => "unrecognized construct",
            ErrorCode::E104 => "nesting too deep",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E103.to_string(), "E103");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "unexpected end of input");
        assert_eq!(ErrorCode::E102.description(), "missing scene header");
    }
}

//! The [`SyntaxError`] type returned when a document does not parse.

use std::fmt;

use thiserror::Error;

use crate::{
    error::ErrorCode,
    parser::MAX_NESTING_DEPTH,
    span::Span,
    tokens::{Token, TokenKind},
};

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific kind of token.
    Kind(TokenKind),
    /// The word `scene` that opens every document.
    SceneKeyword,
    /// The right-hand side of a property.
    Value,
    /// A property or a child block (strict mode).
    PropertyOrBlock,
    /// Nothing more after the document (strict mode).
    EndOfInput,
    /// A block that does not open past the nesting limit.
    NestingLimit,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => kind.fmt(f),
            Expected::SceneKeyword => write!(f, "`scene`"),
            Expected::Value => write!(f, "a property value"),
            Expected::PropertyOrBlock => write!(f, "a property or child block"),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::NestingLimit => {
                write!(f, "at most {MAX_NESTING_DEPTH} nested blocks")
            }
        }
    }
}

/// What the parser found instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => token.fmt(f),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A grammar violation.
///
/// `index` is the position in the token stream where parsing stopped; for
/// an early end of input it equals the number of tokens.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {found} at token #{index}")]
pub struct SyntaxError {
    expected: Expected,
    found: Found,
    index: usize,
    span: Span,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(expected: Expected, found: Found, index: usize, span: Span) -> Self {
        Self {
            expected,
            found,
            index,
            span,
        }
    }

    /// What the parser was looking for.
    pub fn expected(&self) -> Expected {
        self.expected
    }

    /// What the parser found instead.
    pub fn found(&self) -> &Found {
        &self.found
    }

    /// Index of the offending token in the token stream.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte span of the offending token, or an empty span at the end of the
    /// last token when input ran out.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns `true` if the input ended too early.
    pub fn is_end_of_input(&self) -> bool {
        self.found == Found::EndOfInput
    }

    /// The error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self.expected {
            Expected::SceneKeyword => ErrorCode::E102,
            Expected::PropertyOrBlock | Expected::EndOfInput => ErrorCode::E103,
            Expected::NestingLimit => ErrorCode::E104,
            _ if self.is_end_of_input() => ErrorCode::E101,
            _ => ErrorCode::E100,
        }
    }

    /// A short label for the offending location.
    pub fn label(&self) -> &'static str {
        self.code().description()
    }

    /// Help text with a suggestion to fix the error, if there is one.
    pub fn help(&self) -> Option<&'static str> {
        match self.expected {
            Expected::SceneKeyword => Some("a document starts with `scene { ... }`"),
            Expected::Kind(TokenKind::RightBrace) if self.is_end_of_input() => {
                Some("add the missing closing `}`")
            }
            Expected::Value => {
                Some("a value is a string, a hex color, numbers, `true`/`false` or a bare word")
            }
            Expected::PropertyOrBlock | Expected::EndOfInput => {
                Some("remove it, or parse in tolerant mode to skip it")
            }
            Expected::NestingLimit => {
                Some("flatten the scene by moving deeply nested groups up a level")
            }
            _ => None,
        }
    }
}

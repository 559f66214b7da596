use std::fmt;

use crate::span::Span;

/// Token kinds, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,
    Colon,
    Semicolon,
    StringLiteral,
    HashColor,
    Number,
    Word,
}

/// Token types for the Spatex language
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Punctuation
    LeftBrace,  // {
    RightBrace, // }
    Colon,      // :
    Semicolon,  // ;

    // Literals
    StringLiteral(String),
    HashColor(String),
    Number(f64),
    Word(String),
}

impl Token {
    /// The kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::Colon => TokenKind::Colon,
            Token::Semicolon => TokenKind::Semicolon,
            Token::StringLiteral(_) => TokenKind::StringLiteral,
            Token::HashColor(_) => TokenKind::HashColor,
            Token::Number(_) => TokenKind::Number,
            Token::Word(_) => TokenKind::Word,
        }
    }

    /// The word text, if this is a [`Token::Word`].
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(word) => Some(word),
            _ => None,
        }
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken {
    pub token: Token,
    pub span: Span,
}

impl PositionedToken {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}

impl std::ops::Deref for PositionedToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl AsRef<Token> for PositionedToken {
    fn as_ref(&self) -> &Token {
        &self.token
    }
}

impl fmt::Display for PositionedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftBrace => write!(f, "`{{`"),
            TokenKind::RightBrace => write!(f, "`}}`"),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::HashColor => write!(f, "hex color"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Word => write!(f, "word"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftBrace => write!(f, "`{{`"),
            Token::RightBrace => write!(f, "`}}`"),
            Token::Colon => write!(f, "`:`"),
            Token::Semicolon => write!(f, "`;`"),
            Token::StringLiteral(s) => write!(f, "string \"{s}\""),
            Token::HashColor(hex) => write!(f, "color `{hex}`"),
            Token::Number(n) => write!(f, "number `{n}`"),
            Token::Word(word) => write!(f, "word `{word}`"),
        }
    }
}

//! Recursive-descent parser for Spatex source tokens.
//!
//! This module turns the token stream from the [`lexer`](super::lexer) into
//! the untyped tree defined in [`parser_types`](super::parser_types). The
//! public entry point is [`build_document`].
//!
//! Grammar:
//!
//! ```text
//! document    := WORD("scene") LBRACE block RBRACE
//! block       := (property | child_block)*
//! property    := WORD COLON value [SEMI]
//! value       := STRING | HASH | BOOLWORD | NUMBER+ | WORD
//! child_block := WORD [WORD] LBRACE block RBRACE
//! ```
//!
//! Inside a block, a `WORD` followed by `COLON` starts a property and a
//! `WORD` followed by `LBRACE`, or by `WORD LBRACE`, starts a child block.
//! What happens to any other token depends on the [`ParseMode`].
//!
//! Child blocks nest at most [`MAX_NESTING_DEPTH`] levels below the scene.

use log::{debug, trace};
use serde::Deserialize;

use spatex_core::value::Value;

use crate::{
    error::{Expected, Found, Result, SyntaxError},
    parser_types::ParseNode,
    span::Span,
    tokens::{PositionedToken, Token, TokenKind},
};

/// The word every document starts with.
const SCENE_KEYWORD: &str = "scene";

/// How many child blocks may nest inside one another below the scene block.
pub const MAX_NESTING_DEPTH: usize = 256;

/// How the parser treats tokens that fit no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip a stray token inside a block and carry on; ignore anything after
    /// the document's closing brace.
    #[default]
    Tolerant,
    /// Reject stray tokens inside blocks and anything after the document.
    Strict,
}

/// Configuration for the parsing phase.
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    pub mode: ParseMode,
}

impl ParseConfig {
    /// Create a new ParseConfig with the given mode
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }
}

/// Cursor over a token slice.
struct Parser<'t> {
    tokens: &'t [PositionedToken],
    pos: usize,
    mode: ParseMode,
    /// Number of child blocks currently open.
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [PositionedToken], mode: ParseMode) -> Self {
        Self {
            tokens,
            pos: 0,
            mode,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'t PositionedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind())
    }

    fn advance(&mut self) -> Option<&'t PositionedToken> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Span to report when input has run out.
    fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map_or(Span::default(), |t| Span::empty_at(t.span.end()))
    }

    /// Build an error at the current position.
    fn error(&self, expected: Expected) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::new(
                expected,
                Found::Token(token.token.clone()),
                self.pos,
                token.span,
            ),
            None => SyntaxError::new(expected, Found::EndOfInput, self.pos, self.end_span()),
        }
    }

    /// Consume a token of the given kind or fail without consuming.
    fn expect(&mut self, kind: TokenKind) -> Result<&'t PositionedToken> {
        match self.peek() {
            Some(token) if token.kind() == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error(Expected::Kind(kind))),
        }
    }

    fn expect_word(&mut self) -> Result<(&'t str, Span)> {
        let token = self.expect(TokenKind::Word)?;
        let word = token.as_word().unwrap_or_default();
        Ok((word, token.span))
    }

    /// `WORD COLON` at the current position.
    fn at_property(&self) -> bool {
        self.peek_kind_at(0) == Some(TokenKind::Word)
            && self.peek_kind_at(1) == Some(TokenKind::Colon)
    }

    /// `WORD LBRACE` or `WORD WORD LBRACE` at the current position.
    fn at_child_block(&self) -> bool {
        if self.peek_kind_at(0) != Some(TokenKind::Word) {
            return false;
        }
        match self.peek_kind_at(1) {
            Some(TokenKind::LeftBrace) => true,
            Some(TokenKind::Word) => self.peek_kind_at(2) == Some(TokenKind::LeftBrace),
            _ => false,
        }
    }

    /// `document := WORD("scene") LBRACE block RBRACE`
    fn document(&mut self) -> Result<ParseNode> {
        let (keyword, start) = match self.peek() {
            Some(token) if token.as_word() == Some(SCENE_KEYWORD) => {
                self.pos += 1;
                (SCENE_KEYWORD, token.span)
            }
            _ => return Err(self.error(Expected::SceneKeyword)),
        };

        let mut root = ParseNode::new(keyword, None);
        self.expect(TokenKind::LeftBrace)?;
        self.block(&mut root)?;
        let close = self.expect(TokenKind::RightBrace)?;
        root.span = start.union(close.span);

        if self.pos < self.tokens.len() {
            match self.mode {
                ParseMode::Strict => return Err(self.error(Expected::EndOfInput)),
                ParseMode::Tolerant => {
                    debug!(
                        index = self.pos,
                        count = self.tokens.len() - self.pos;
                        "Ignoring tokens after the document"
                    );
                }
            }
        }

        Ok(root)
    }

    /// Fill `node` with properties and child blocks up to, but not
    /// including, the closing brace or the end of input.
    fn block(&mut self, node: &mut ParseNode) -> Result<()> {
        while let Some(token) = self.peek() {
            if token.kind() == TokenKind::RightBrace {
                break;
            }

            if self.at_property() {
                let (key, value) = self.property()?;
                trace!(node = node.node_type.as_str(), key = key.as_str(); "Parsed property");
                node.properties.insert(key, value);
            } else if self.at_child_block() {
                let child = self.child_block()?;
                node.children.push(child);
            } else {
                match self.mode {
                    ParseMode::Strict => return Err(self.error(Expected::PropertyOrBlock)),
                    ParseMode::Tolerant => {
                        debug!(index = self.pos, token:% = token; "Skipping unrecognized token");
                        self.pos += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// `property := WORD COLON value [SEMI]`
    fn property(&mut self) -> Result<(String, Value)> {
        let (key, _) = self.expect_word()?;
        self.expect(TokenKind::Colon)?;
        let value = self.value()?;
        if self.peek_kind_at(0) == Some(TokenKind::Semicolon) {
            self.pos += 1;
        }
        Ok((key.to_string(), value))
    }

    /// `value := STRING | HASH | BOOLWORD | NUMBER+ | WORD`
    ///
    /// A run of numbers collapses to a scalar when it has one element and to
    /// a vector otherwise.
    fn value(&mut self) -> Result<Value> {
        let Some(token) = self.peek() else {
            return Err(self.error(Expected::Value));
        };

        let value = match &token.token {
            Token::StringLiteral(s) => Value::Str(s.clone()),
            Token::HashColor(hex) => Value::HexColor(hex.clone()),
            Token::Word(word) => match word.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::Ident(word.clone()),
            },
            Token::Number(_) => return Ok(self.number_run()),
            Token::LeftBrace | Token::RightBrace | Token::Colon | Token::Semicolon => {
                return Err(self.error(Expected::Value));
            }
        };
        self.pos += 1;
        Ok(value)
    }

    fn number_run(&mut self) -> Value {
        let mut numbers = Vec::new();
        while let Some(Token::Number(n)) = self.peek().map(|t| &t.token) {
            numbers.push(*n);
            self.pos += 1;
        }

        match numbers.as_slice() {
            [single] => Value::Num(*single),
            _ => Value::Vec(numbers),
        }
    }

    /// `child_block := WORD [WORD] LBRACE block RBRACE`
    fn child_block(&mut self) -> Result<ParseNode> {
        let (node_type, start) = self.expect_word()?;
        let name = match self.peek().and_then(|t| t.as_word()) {
            Some(name) => {
                self.advance();
                Some(name.to_string())
            }
            None => None,
        };

        if self.depth >= MAX_NESTING_DEPTH {
            debug!(depth = self.depth, index = self.pos; "Nesting limit reached");
            return Err(self.error(Expected::NestingLimit));
        }

        let mut node = ParseNode::new(node_type, name);
        self.expect(TokenKind::LeftBrace)?;
        self.depth += 1;
        let body = self.block(&mut node);
        self.depth -= 1;
        body?;
        let close = self.expect(TokenKind::RightBrace)?;
        node.span = start.union(close.span);
        Ok(node)
    }
}

/// Parse a token stream into the document's parse tree.
///
/// Fails with a [`SyntaxError`] at the first grammar violation; there is no
/// partial result.
pub fn build_document(tokens: &[PositionedToken], config: &ParseConfig) -> Result<ParseNode> {
    let mut parser = Parser::new(tokens, config.mode);
    let document = parser.document()?;
    trace!(document:?; "Parsed document");
    Ok(document)
}

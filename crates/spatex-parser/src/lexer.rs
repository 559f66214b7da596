//! Lexical analyzer for Spatex source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! Whitespace and comments are dropped here, so the parser only ever sees
//! significant tokens.
//!
//! The public entry point is [`tokenize`]. It never fails: a character that
//! starts no token is dropped and lexing resumes at the next character.

use log::trace;
use winnow::{
    Parser as _,
    combinator::{alt, preceded, terminated},
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, rest, take_until, take_while},
};

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O>;

/// Characters allowed after the first character of a number.
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Characters allowed after the first character of a word.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse a run of whitespace
fn whitespace(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., char::is_whitespace).void().parse_next(input)
}

/// Parse a `/* ... */` comment.
///
/// An unterminated comment runs to the end of input.
fn block_comment(input: &mut Input<'_>) -> IResult<()> {
    preceded("/*", alt((terminated(take_until(0.., "*/"), "*/"), rest)))
        .void()
        .parse_next(input)
}

/// Parse line comment starting with '//'
fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    preceded("//", take_while(0.., |c| c != '\n'))
        .void()
        .parse_next(input)
}

/// Anything the parser never sees.
fn trivia(input: &mut Input<'_>) -> IResult<()> {
    alt((whitespace, block_comment, line_comment)).parse_next(input)
}

/// Parse single character tokens
fn punctuation(input: &mut Input<'_>) -> IResult<Token> {
    alt((
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        ':'.value(Token::Colon),
        ';'.value(Token::Semicolon),
    ))
    .parse_next(input)
}

/// Parse a quoted string literal.
///
/// Either `"` or `'` opens the string and only the same character closes
/// it. A backslash takes the next character verbatim, so `\"` is a quote and
/// `\n` is the letter `n`. An unterminated string runs to the end of input.
fn string_literal(input: &mut Input<'_>) -> IResult<Token> {
    let quote = one_of(['"', '\'']).parse_next(input)?;

    let mut value = String::new();
    loop {
        match input.next_token() {
            None => break,
            Some(c) if c == quote => break,
            Some('\\') => {
                if let Some(escaped) = input.next_token() {
                    value.push(escaped);
                }
            }
            Some(c) => value.push(c),
        }
    }

    Ok(Token::StringLiteral(value))
}

/// Parse a `#` followed by any number of hex digits, kept verbatim.
fn hash_color(input: &mut Input<'_>) -> IResult<Token> {
    ('#', take_while(0.., |c: char| c.is_ascii_hexdigit()))
        .take()
        .map(|hex: &str| Token::HashColor(hex.to_string()))
        .parse_next(input)
}

/// Parse a number literal.
///
/// A number starts with a digit, or with `-` immediately followed by a digit
/// or `.`; a `-` anywhere else is not part of a number.
fn number(input: &mut Input<'_>) -> IResult<Token> {
    alt((
        ('-', take_while(1.., is_number_char)).void(),
        (one_of(|c: char| c.is_ascii_digit()), take_while(0.., is_number_char)).void(),
    ))
    .take()
    .map(|text: &str| Token::Number(parse_decimal(text)))
    .parse_next(input)
}

/// Parse a word: a letter or underscore, then letters, digits, underscores.
fn word(input: &mut Input<'_>) -> IResult<Token> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_word_char),
    )
        .take()
        .map(|word: &str| Token::Word(word.to_string()))
        .parse_next(input)
}

/// Parse a single significant token
fn token(input: &mut Input<'_>) -> IResult<Token> {
    alt((punctuation, string_literal, hash_color, number, word)).parse_next(input)
}

/// Convert the text of a number token to its value.
///
/// The text is a run of digits and dots with an optional leading `-`. Only
/// the prefix before a second `.` counts, so `1.2.3` reads as `1.2`. Text
/// with no digits in that prefix, such as `-.`, reads as NaN.
fn parse_decimal(text: &str) -> f64 {
    let end = text
        .match_indices('.')
        .nth(1)
        .map_or(text.len(), |(idx, _)| idx);
    text[..end].parse().unwrap_or(f64::NAN)
}

/// Tokenize source text.
///
/// Whitespace and comments produce no tokens. Characters that start no
/// token are dropped silently.
///
/// # Example
///
/// ```
/// use spatex_parser::{Token, tokenize};
///
/// let tokens: Vec<Token> = tokenize("scene { }").into_iter().map(|t| t.token).collect();
/// assert_eq!(
///     tokens,
///     [Token::Word("scene".to_string()), Token::LeftBrace, Token::RightBrace]
/// );
/// ```
pub fn tokenize(source: &str) -> Vec<PositionedToken> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();

    while !input.is_empty() {
        let checkpoint = input.checkpoint();
        if trivia(&mut input).is_ok() {
            continue;
        }
        input.reset(&checkpoint);

        let start = input.current_token_start();
        match token(&mut input) {
            Ok(token) => {
                let span = Span::new(start..input.current_token_start());
                tokens.push(PositionedToken::new(token, span));
            }
            Err(_) => {
                input.reset(&checkpoint);
                let skipped = input.next_token();
                trace!(offset = start, skipped:?; "Dropping unrecognized character");
            }
        }
    }

    trace!(count = tokens.len(); "Tokenized source");
    tokens
}

//! Error adapter for converting SpatexError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use spatex::SpatexError;
use spatex_parser::{Span, SyntaxError};

/// Adapter for a syntax error together with the source it came from.
pub struct SyntaxErrorAdapter<'a> {
    err: &'a SyntaxError,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> SyntaxErrorAdapter<'a> {
    /// Create a new syntax error adapter.
    pub fn new(err: &'a SyntaxError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for SyntaxErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for SyntaxErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for SyntaxErrorAdapter<'_> {}

impl MietteDiagnostic for SyntaxErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.err.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.err
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(
            Some(self.err.label().to_string()),
            span_to_miette(self.err.span()),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-syntax [`SpatexError`] variants.
///
/// This adapter handles errors that don't have source locations, such as
/// I/O errors, configuration errors, and export errors.
pub struct ErrorAdapter<'a>(pub &'a SpatexError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SpatexError::Io(_) => "spatex::io",
            SpatexError::Parse { err, .. } => return Some(Box::new(err.code())),
            SpatexError::Export(_) => "spatex::export",
            SpatexError::Config(_) => "spatex::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A syntax error with source location information.
    Syntax(SyntaxErrorAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Syntax(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Syntax(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Syntax(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Syntax(s) => s.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Syntax(s) => s.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Syntax(s) => s.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a Spatex [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`SpatexError`] into something miette can render.
pub fn to_reportable(err: &SpatexError) -> Reportable<'_> {
    match err {
        SpatexError::Parse { err, src } => Reportable::Syntax(SyntaxErrorAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Render `err` as a full diagnostic report.
///
/// Parse errors get the source snippet, a label at the offending token and
/// help text; other errors render as a one-line report with their code.
pub fn render_report(err: &SpatexError, color: bool) -> Result<String, fmt::Error> {
    let theme = if color {
        miette::GraphicalTheme::unicode()
    } else {
        miette::GraphicalTheme::unicode_nocolor()
    };

    let mut out = String::new();
    miette::GraphicalReportHandler::new_themed(theme).render_report(&mut out, &to_reportable(err))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use spatex_parser::{Expected, Found, Token, TokenKind};

    use super::*;

    fn syntax_error() -> SpatexError {
        let err = SyntaxError::new(
            Expected::Kind(TokenKind::LeftBrace),
            Found::Token(Token::Word("box".to_string())),
            2,
            Span::new(11..14),
        );
        SpatexError::new_parse_error(err, "scene { cube box box { } }")
    }

    #[test]
    fn test_syntax_error_is_reported_with_source() {
        let err = syntax_error();
        let reportable = to_reportable(&err);

        match &reportable {
            Reportable::Syntax(s) => {
                assert_eq!(
                    s.to_string(),
                    "expected `{`, found word `box` at token #2"
                );
            }
            Reportable::Error(_) => panic!("Expected Syntax"),
        }
        assert_eq!(reportable.code().unwrap().to_string(), "E100");
        assert!(reportable.source_code().is_some());
    }

    #[test]
    fn test_label_points_at_span() {
        let err = syntax_error();
        let reportable = to_reportable(&err);

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("unexpected token"));
        assert_eq!(labels[0].offset(), 11);
        assert_eq!(labels[0].len(), 3);
    }

    #[test]
    fn test_non_parse_error() {
        let err = SpatexError::Config("bad value".to_string());

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad value");
            }
            Reportable::Syntax(_) => panic!("Expected Error"),
        }
        assert_eq!(reportable.code().unwrap().to_string(), "spatex::config");
        assert!(reportable.labels().is_none());
    }

    #[test]
    fn test_report_renders_help() {
        let err = SyntaxError::new(
            Expected::SceneKeyword,
            Found::Token(Token::Word("cube".to_string())),
            0,
            Span::new(0..4),
        );
        let err = SpatexError::new_parse_error(err, "cube { }");

        let mut out = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &to_reportable(&err))
            .unwrap();
        assert!(out.contains("E102"));
        assert!(out.contains("scene { ... }"));
    }

    #[test]
    fn test_render_report_for_deep_nesting() {
        let err = SyntaxError::new(
            Expected::NestingLimit,
            Found::Token(Token::LeftBrace),
            3,
            Span::new(8..9),
        );
        let err = SpatexError::new_parse_error(err, "scene { g { } }");

        let out = render_report(&err, false).unwrap();
        assert!(out.contains("E104"), "{out}");
        assert!(out.contains("nesting too deep"), "{out}");
    }

    #[test]
    fn test_render_report_for_config_error() {
        let err = SpatexError::Config("invalid configuration in a.toml: bad".to_string());

        let out = render_report(&err, false).unwrap();
        assert!(out.contains("spatex::config"), "{out}");
        assert!(out.contains("a.toml"), "{out}");
    }
}

//! Unit tests for the recursive-descent parser.
//!
//! These tests run source text through the tokenizer and the parser and
//! check the resulting parse tree or error.

use spatex_core::value::Value;

use crate::{
    error::{ErrorCode, Expected, Found, SyntaxError},
    lexer,
    parser::{self, MAX_NESTING_DEPTH, ParseConfig, ParseMode},
    parser_types::ParseNode,
    span::Span,
    tokens::{Token, TokenKind},
};

fn parse_in(source: &str, mode: ParseMode) -> Result<ParseNode, SyntaxError> {
    let tokens = lexer::tokenize(source);
    parser::build_document(&tokens, &ParseConfig::new(mode))
}

/// Parse in tolerant mode and panic on error.
fn parse_ok(source: &str) -> ParseNode {
    match parse_in(source, ParseMode::Tolerant) {
        Ok(node) => node,
        Err(err) => panic!("Expected parsing to succeed, but got error: {err}"),
    }
}

fn parse_err(source: &str, mode: ParseMode) -> SyntaxError {
    match parse_in(source, mode) {
        Ok(node) => panic!("Expected parsing to fail, but got {node:?}"),
        Err(err) => err,
    }
}

mod document_tests {
    use super::*;

    #[test]
    fn test_empty_scene() {
        let root = parse_ok("scene { }");
        assert_eq!(root.node_type, "scene");
        assert_eq!(root.name, None);
        assert!(root.properties.is_empty());
        assert!(root.children.is_empty());
        assert_eq!(root.span, Span::new(0..9));
    }

    #[test]
    fn test_scene_with_properties_and_children() {
        let root = parse_ok(
            r#"
            scene {
                background: #112233;
                fog: true
                cube box1 { size: 2; }
                sphere { }
            }
            "#,
        );
        assert_eq!(
            root.property("background"),
            Some(&Value::HexColor("#112233".into()))
        );
        assert_eq!(root.property("fog"), Some(&Value::Bool(true)));
        assert_eq!(root.children.len(), 2);

        let cube = &root.children[0];
        assert_eq!(cube.node_type, "cube");
        assert_eq!(cube.name.as_deref(), Some("box1"));
        assert_eq!(cube.property("size"), Some(&Value::Num(2.0)));

        let sphere = &root.children[1];
        assert_eq!(sphere.node_type, "sphere");
        assert_eq!(sphere.name, None);
    }

    #[test]
    fn test_nested_groups() {
        let root = parse_ok("scene { group outer { group inner { cube c { } } } }");
        let outer = &root.children[0];
        let inner = &outer.children[0];
        assert_eq!(outer.name.as_deref(), Some("outer"));
        assert_eq!(inner.name.as_deref(), Some("inner"));
        assert_eq!(inner.children[0].name.as_deref(), Some("c"));
    }

    #[test]
    fn test_child_span_covers_type_to_closing_brace() {
        let root = parse_ok("scene { cube a { } }");
        assert_eq!(root.children[0].span, Span::new(8..18));
    }

    #[test]
    fn test_comments_are_ignored() {
        let root = parse_ok(
            r#"
            // a scene
            scene { /* inline */ cube { size: 1 } }
            "#,
        );
        assert_eq!(root.children.len(), 1);
    }
}

mod value_tests {
    use super::*;

    fn single_value(value_source: &str) -> Value {
        let root = parse_ok(&format!("scene {{ key: {value_source}; }}"));
        root.property("key").cloned().expect("property `key`")
    }

    #[test]
    fn test_string_value() {
        assert_eq!(single_value(r#""hello world""#), Value::Str("hello world".into()));
    }

    #[test]
    fn test_hex_color_value() {
        assert_eq!(single_value("#ff8800"), Value::HexColor("#ff8800".into()));
    }

    #[test]
    fn test_boolean_words() {
        assert_eq!(single_value("true"), Value::Bool(true));
        assert_eq!(single_value("false"), Value::Bool(false));
    }

    #[test]
    fn test_other_word_is_identifier() {
        assert_eq!(single_value("left"), Value::Ident("left".into()));
        assert_eq!(single_value("True"), Value::Ident("True".into()));
    }

    #[test]
    fn test_single_number_is_scalar() {
        assert_eq!(single_value("2.5"), Value::Num(2.5));
    }

    #[test]
    fn test_number_run_is_vector() {
        assert_eq!(single_value("1 -2 3.5"), Value::Vec(vec![1.0, -2.0, 3.5]));
        assert_eq!(single_value("1 2 3 4"), Value::Vec(vec![1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_semicolon_is_optional() {
        let root = parse_ok("scene { a: 1 b: 2 3 c: x }");
        assert_eq!(root.property("a"), Some(&Value::Num(1.0)));
        assert_eq!(root.property("b"), Some(&Value::Vec(vec![2.0, 3.0])));
        assert_eq!(root.property("c"), Some(&Value::Ident("x".into())));
    }

    #[test]
    fn test_duplicate_key_keeps_first_position_and_last_value() {
        let root = parse_ok("scene { a: 1; b: 2; a: 3; }");
        let keys: Vec<_> = root.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(root.property("a"), Some(&Value::Num(3.0)));
    }

    #[test]
    fn test_missing_value_fails() {
        let err = parse_err("scene { a: }", ParseMode::Tolerant);
        assert_eq!(err.expected(), Expected::Value);
        assert_eq!(err.found(), &Found::Token(Token::RightBrace));
        assert_eq!(err.code(), ErrorCode::E100);
        assert_eq!(err.index(), 3);
    }
}

mod tolerant_mode_tests {
    use super::*;

    #[test]
    fn test_stray_tokens_in_block_are_skipped() {
        let root = parse_ok("scene { 42 ; \"loose\" cube { } : }");
        assert_eq!(root.children.len(), 1);
        assert!(root.properties.is_empty());
    }

    #[test]
    fn test_word_runs_without_brace_are_skipped() {
        let root = parse_ok("scene { foo bar baz cube a { } }");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name.as_deref(), Some("a"));
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let root = parse_ok("scene { } scene { cube { } }");
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_unknown_characters_never_reach_the_parser() {
        let root = parse_ok("scene { @ cube $ { } }");
        assert_eq!(root.children.len(), 1);
    }
}

mod strict_mode_tests {
    use super::*;

    #[test]
    fn test_stray_token_in_block_fails() {
        let err = parse_err("scene { 42 cube { } }", ParseMode::Strict);
        assert_eq!(err.expected(), Expected::PropertyOrBlock);
        assert_eq!(err.found(), &Found::Token(Token::Number(42.0)));
        assert_eq!(err.index(), 2);
        assert_eq!(err.span(), Span::new(8..10));
        assert_eq!(err.code(), ErrorCode::E103);
    }

    #[test]
    fn test_trailing_tokens_fail() {
        let err = parse_err("scene { } extra", ParseMode::Strict);
        assert_eq!(err.expected(), Expected::EndOfInput);
        assert_eq!(err.index(), 3);
        assert_eq!(err.code(), ErrorCode::E103);
    }

    #[test]
    fn test_well_formed_document_parses() {
        let root = parse_in(
            "scene { camera { angle: 30 20; } group g { line { from: a; to: b } } }",
            ParseMode::Strict,
        )
        .expect("strict parse");
        assert_eq!(root.children.len(), 2);
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_header() {
        let err = parse_err("cube { }", ParseMode::Tolerant);
        assert_eq!(err.expected(), Expected::SceneKeyword);
        assert_eq!(err.index(), 0);
        assert_eq!(err.code(), ErrorCode::E102);
    }

    #[test]
    fn test_empty_source() {
        let err = parse_err("", ParseMode::Tolerant);
        assert_eq!(err.expected(), Expected::SceneKeyword);
        assert!(err.is_end_of_input());
        assert_eq!(err.code(), ErrorCode::E102);
    }

    #[test]
    fn test_missing_scene_brace() {
        let err = parse_err("scene cube { }", ParseMode::Tolerant);
        assert_eq!(err.expected(), Expected::Kind(TokenKind::LeftBrace));
        assert_eq!(err.index(), 1);
        assert_eq!(err.code(), ErrorCode::E100);
    }

    #[test]
    fn test_unclosed_blocks() {
        let err = parse_err("scene { cube { ", ParseMode::Tolerant);
        assert_eq!(err.expected(), Expected::Kind(TokenKind::RightBrace));
        assert!(err.is_end_of_input());
        assert_eq!(err.index(), 4);
        assert_eq!(err.span(), Span::empty_at(14));
        assert_eq!(err.code(), ErrorCode::E101);
    }

    #[test]
    fn test_dangling_word_at_end() {
        let err = parse_err("scene { cube", ParseMode::Tolerant);
        assert_eq!(err.code(), ErrorCode::E101);
        assert_eq!(err.index(), 3);
    }

    #[test]
    fn test_error_message() {
        let err = parse_err("scene { a: ; }", ParseMode::Tolerant);
        assert_eq!(
            err.to_string(),
            "expected a property value, found `;` at token #3"
        );
    }
}

mod nesting_tests {
    use super::*;

    /// A scene with `levels` groups nested inside one another.
    fn nested_groups(levels: usize) -> String {
        format!(
            "scene {{ {}{} }}",
            "group { ".repeat(levels),
            "} ".repeat(levels)
        )
    }

    fn depth_of(node: &ParseNode) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(child) = current.children.first() {
            depth += 1;
            current = child;
        }
        depth
    }

    #[test]
    fn test_nesting_up_to_limit_parses() {
        let root = parse_ok(&nested_groups(MAX_NESTING_DEPTH));
        assert_eq!(depth_of(&root), MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_nesting_past_limit_fails() {
        let err = parse_err(&nested_groups(MAX_NESTING_DEPTH + 1), ParseMode::Tolerant);
        assert_eq!(err.expected(), Expected::NestingLimit);
        assert_eq!(err.found(), &Found::Token(Token::LeftBrace));
        // `scene {` then one `group {` pair per level; the last `{` is refused.
        assert_eq!(err.index(), 2 * (MAX_NESTING_DEPTH + 1) + 1);
        assert_eq!(err.code(), ErrorCode::E104);
        assert!(err.help().is_some());
    }

    #[test]
    fn test_very_deep_nesting_is_an_error_in_both_modes() {
        let source = nested_groups(200_000);
        for mode in [ParseMode::Tolerant, ParseMode::Strict] {
            let err = parse_err(&source, mode);
            assert_eq!(err.code(), ErrorCode::E104);
        }
    }

    #[test]
    fn test_siblings_do_not_count_toward_depth() {
        let source = format!("scene {{ {} }}", "cube { } ".repeat(MAX_NESTING_DEPTH * 2));
        let root = parse_ok(&source);
        assert_eq!(root.children.len(), MAX_NESTING_DEPTH * 2);
    }
}

//! Integration tests for the Compiler API
//!
//! These tests verify that the public API works and is usable.

use spatex::{
    Compiler, ErrorCode, ParseMode, SpatexError,
    config::{AppConfig, OutputConfig, ParserConfig},
};

#[test]
fn test_compiler_api_exists() {
    let compiler = Compiler::default();
    assert_eq!(compiler.config().parser().mode(), ParseMode::Tolerant);
}

#[test]
fn test_parse_simple_scene() {
    let source = r#"
        scene {
            background: #101010;
            cube box1 { color: #ff0000; }
        }
    "#;

    let compiler = Compiler::default();
    let result = compiler.parse(source);
    assert!(result.is_ok(), "Should parse valid scene: {:?}", result.err());

    let scene = result.unwrap();
    assert_eq!(scene.background, "#101010");
    assert_eq!(scene.objects.len(), 1);
}

#[test]
fn test_parse_error_keeps_source() {
    let source = "scene { cube { ";
    let err = Compiler::default().parse(source).unwrap_err();

    match err {
        SpatexError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(err.code(), ErrorCode::E101);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_strict_config_rejects_stray_tokens() {
    let source = "scene { cube a { } ; }";
    assert!(Compiler::default().parse(source).is_ok());

    let strict = Compiler::new(AppConfig::default().with_strict());
    assert!(matches!(
        strict.parse(source),
        Err(SpatexError::Parse { .. })
    ));
}

#[test]
fn test_json_export_layout() {
    let source = r#"
        scene {
            cube a { pos: 1 0 0; }
            group g { pos: 0 5 0; sphere s { radius: 2; } }
            arrow { from: a; to: s; label: "edge"; }
        }
    "#;
    let compiler = Compiler::new(AppConfig::new(
        ParserConfig::default(),
        OutputConfig::new(false),
    ));
    let json = compiler.compile(source).expect("Failed to compile");
    assert!(!json.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["type"], "scene");
    assert_eq!(value["objects"][0]["type"], "cube");
    assert_eq!(value["objects"][0]["size"], 1.0);
    assert_eq!(value["objects"][1]["type"], "group");
    assert_eq!(value["objects"][1]["children"][0]["radius"], 2.0);
    assert_eq!(value["connectors"][0]["type"], "arrow");
    assert_eq!(value["connectors"][0]["from"]["ref"], "a");
    assert_eq!(value["connectors"][0]["to"]["pos"], serde_json::json!([0.0, 0.0, 0.0]));
    assert_eq!(value["connectors"][0]["label"], "edge");
}

#[test]
fn test_pretty_output_by_default() {
    let json = Compiler::default()
        .compile("scene { }")
        .expect("Failed to compile");
    assert!(json.contains('\n'));
}

//! JSON parser tests against the public API.

use pretty_assertions::assert_eq;

use structconv::parser::{self, Format};
use structconv::{CancellationToken, DiagnosticKind, EngineConfig, Number, Severity, Status, Value};

fn parse(text: &str) -> structconv::ParseOutcome {
    parser::parse(text, Format::Json, &EngineConfig::default())
}

fn parsed(text: &str) -> Value {
    let outcome = parse(text);
    assert_eq!(outcome.status, Status::Success, "{:?}", outcome.diagnostics);
    outcome.value.unwrap()
}

#[test]
fn test_scalar_documents() {
    assert_eq!(parsed("null"), Value::Null);
    assert_eq!(parsed("true"), Value::Bool(true));
    assert_eq!(parsed("\"hi\""), Value::String("hi".to_string()));
    assert_eq!(parsed("42"), Value::Number(Number::from_i64(42)));
}

#[test]
fn test_nested_document() {
    let value = parsed(r#"{"users": [{"id": 1, "name": "Ada"}], "total": 1}"#);
    let users = value.get("users").unwrap().as_array().unwrap();
    assert_eq!(users[0].get("name"), Some(&Value::String("Ada".to_string())));
    assert_eq!(value.get("total"), Some(&Value::Number(Number::from_i64(1))));
}

#[test]
fn test_key_order_preserved() {
    let value = parsed(r#"{"z": 1, "a": 2, "m": 3}"#);
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_missing_value_position() {
    // The reference failure: a diagnostic must point at the exact column.
    let outcome = parse(r#"{"a": 1, "b": }"#);
    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.value.is_none());
    let error = outcome
        .diagnostics
        .iter()
        .find(|d| d.is_error())
        .expect("an error diagnostic");
    assert_eq!(error.kind, DiagnosticKind::Syntax);
    assert_eq!((error.line, error.column), (1, 15));
}

#[test]
fn test_position_spans_lines() {
    let outcome = parse("{\n  \"a\": 1,\n  \"b\": ]\n}");
    let error = &outcome.diagnostics[0];
    assert_eq!(error.line, 3);
    assert_eq!(error.column, 8);
}

#[test]
fn test_duplicate_keys_kept_and_warned() {
    let outcome = parse(r#"{"k": 1, "k": 2}"#);
    assert_eq!(outcome.status, Status::Success);
    let value = outcome.value.unwrap();
    let entries = value.as_object().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].1, Value::Number(Number::from_i64(1)));
    assert_eq!(entries[1].1, Value::Number(Number::from_i64(2)));

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
    assert!(outcome.diagnostics[0].message.contains("\"k\""));
}

#[test]
fn test_number_literals_survive() {
    let value = parsed(r#"[1.50, 1e3, -0.5, 9007199254740993]"#);
    let items = value.as_array().unwrap();
    assert_eq!(items[0], Value::Number(Number::from_literal("1.50")));
    assert_eq!(items[1], Value::Number(Number::from_literal("1e3")));
    // Past 2^53: the literal is still exact even if f64 is not
    assert_eq!(
        items[3],
        Value::Number(Number::from_literal("9007199254740993"))
    );
}

#[test]
fn test_invalid_numbers_rejected() {
    for text in ["01", "1.", ".5", "+1", "1e"] {
        let outcome = parse(text);
        assert_eq!(outcome.status, Status::Failed, "{} should fail", text);
    }
}

#[test]
fn test_string_escapes() {
    let value = parsed(r#""a\"b\\c\ndA😀""#);
    assert_eq!(value, Value::String("a\"b\\c\ndA😀".to_string()));
}

#[test]
fn test_lone_surrogate_rejected() {
    assert_eq!(parse(r#""\uD83D""#).status, Status::Failed);
}

#[test]
fn test_control_char_in_string_rejected() {
    assert_eq!(parse("\"a\tb\"").status, Status::Failed);
}

#[test]
fn test_trailing_content_rejected() {
    let outcome = parse("{} extra");
    assert_eq!(outcome.status, Status::Failed);
}

#[test]
fn test_empty_input_rejected() {
    assert_eq!(parse("").status, Status::Failed);
    assert_eq!(parse("   \n ").status, Status::Failed);
}

#[test]
fn test_depth_limit() {
    let mut config = EngineConfig::default();
    config.rules.max_depth = 4;
    let deep = "[[[[[1]]]]]";
    let outcome = parser::parse(deep, Format::Json, &config);
    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.diagnostics[0].message.contains("depth"));

    let shallow = "[[[1]]]";
    assert!(parser::parse(shallow, Format::Json, &config).is_success());
}

#[test]
fn test_cancellation_at_top_level_elements() {
    let token = CancellationToken::new();
    token.cancel();
    let config = EngineConfig::default();
    let outcome =
        parser::parse_with_cancellation("[1, 2, 3]", Format::Json, &config, &token);
    assert_eq!(outcome.status, Status::Cancelled);
    assert!(outcome.value.is_none());
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::Cancelled));
}

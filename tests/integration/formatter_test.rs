//! Reformatting tests: same format in and out, style options applied.

use pretty_assertions::assert_eq;

use structconv::{
    format_text, format_text_with_config, CsvStyle, EngineConfig, Format, JsonIndent, JsonStyle,
    QuoteStyle, Status, YamlStyle,
};

#[test]
fn test_json_pretty_print() {
    let outcome = format_text("{\"b\":[1,2],\"a\":{}}", Format::Json);
    assert_eq!(
        outcome.output.unwrap(),
        "{\n  \"b\": [\n    1,\n    2\n  ],\n  \"a\": {}\n}\n"
    );
}

#[test]
fn test_json_minify() {
    let config = EngineConfig::default().with_json(JsonStyle {
        indent: JsonIndent::Minify,
        sort_keys: false,
        trailing_newline: false,
    });
    let outcome = format_text_with_config(
        "{\n  \"a\": 1,\n  \"b\": [2, 3]\n}\n",
        Format::Json,
        &config,
    );
    assert_eq!(outcome.output.unwrap(), "{\"a\":1,\"b\":[2,3]}");
}

#[test]
fn test_json_custom_indent() {
    let config = EngineConfig::default().with_json(JsonStyle {
        indent: JsonIndent::Spaces(4),
        ..JsonStyle::default()
    });
    let outcome = format_text_with_config("{\"a\":1}", Format::Json, &config);
    assert_eq!(outcome.output.unwrap(), "{\n    \"a\": 1\n}\n");
}

#[test]
fn test_idempotent_for_each_format() {
    let cases = [
        (Format::Json, "{\"a\": [1, {\"b\": null}], \"c\": \"x\"}"),
        (Format::Yaml, "a:\n  - 1\n  - b: null\nc: x\n"),
        (Format::Csv, "id,name\n1,Ada\n2,\"x,y\"\n"),
    ];
    for (format, text) in cases {
        let once = format_text(text, format).output.unwrap();
        let twice = format_text(&once, format).output.unwrap();
        assert_eq!(once, twice, "{} formatting must be idempotent", format);
    }
}

#[test]
fn test_yaml_quote_style_applied() {
    let config = EngineConfig::default().with_yaml(YamlStyle {
        quote_style: QuoteStyle::Double,
        ..YamlStyle::default()
    });
    let outcome = format_text_with_config("a: hello\n", Format::Yaml, &config);
    assert_eq!(outcome.output.unwrap(), "\"a\": \"hello\"\n");
}

#[test]
fn test_csv_delimiter_rewrite() {
    let config = EngineConfig::default().with_csv(CsvStyle {
        delimiter: '\t',
        ..CsvStyle::default()
    });
    // Parse with the same dialect, emit with it too
    let outcome = format_text_with_config("a\tb\n1\tx\n", Format::Csv, &config);
    assert_eq!(outcome.output.unwrap(), "a\tb\n1\tx\n");
}

#[test]
fn test_format_failure_keeps_diagnostics() {
    let outcome = format_text("a: [1, 2\n", Format::Yaml);
    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.output.is_none());
    assert!(outcome.diagnostics.iter().any(|d| d.is_error()));
}

#[test]
fn test_csv_formatting_normalizes_quoting() {
    // Unnecessary quotes disappear; necessary ones stay
    let outcome = format_text("a,b\n\"plain\",\"x,y\"\n", Format::Csv);
    assert_eq!(outcome.output.unwrap(), "a,b\nplain,\"x,y\"\n");
}

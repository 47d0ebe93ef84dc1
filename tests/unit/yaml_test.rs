//! YAML parse and serialize tests against the public API, with serde_yaml
//! as an independent cross-check that emitted YAML is well formed.

use pretty_assertions::assert_eq;

use structconv::parser::{self, Format};
use structconv::serializer;
use structconv::{EngineConfig, Number, QuoteStyle, Status, Value, YamlStyle};

fn parse(text: &str) -> structconv::ParseOutcome {
    parser::parse(text, Format::Yaml, &EngineConfig::default())
}

fn parsed(text: &str) -> Value {
    let outcome = parse(text);
    assert_eq!(outcome.status, Status::Success, "{:?}", outcome.diagnostics);
    outcome.value.unwrap()
}

fn emit(value: &Value, yaml: YamlStyle) -> String {
    let config = EngineConfig::default().with_yaml(yaml);
    serializer::serialize(value, Format::Yaml, &config)
        .text
        .unwrap()
}

#[test]
fn test_mixed_document() {
    let value = parsed(
        "server:\n  host: localhost\n  port: 8080\nfeatures:\n  - auth\n  - metrics\ndebug: false\n",
    );
    let server = value.get("server").unwrap();
    assert_eq!(
        server.get("host"),
        Some(&Value::String("localhost".to_string()))
    );
    assert_eq!(
        server.get("port"),
        Some(&Value::Number(Number::from_i64(8080)))
    );
    assert_eq!(value.get("features").unwrap().as_array().unwrap().len(), 2);
    assert_eq!(value.get("debug"), Some(&Value::Bool(false)));
}

#[test]
fn test_anchors_resolve_to_copies() {
    let value = parsed("defaults: &d\n  retries: 3\njob_a: *d\njob_b: *d\n");
    assert_eq!(value.get("job_a"), value.get("defaults"));
    assert_eq!(value.get("job_b"), value.get("defaults"));
}

#[test]
fn test_alias_cycle_rejected() {
    let outcome = parse("a: &x\n  child: *x\n");
    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.value.is_none());
}

#[test]
fn test_tags_coerce_scalars() {
    let value = parsed("version: !!str 1.20\ncount: !!int 7\nnothing: !!null x\n");
    assert_eq!(
        value.get("version"),
        Some(&Value::String("1.20".to_string()))
    );
    assert_eq!(value.get("count"), Some(&Value::Number(Number::from_i64(7))));
    assert_eq!(value.get("nothing"), Some(&Value::Null));
}

#[test]
fn test_block_scalars_are_unsupported() {
    let outcome = parse("text: |\n  two\n  lines\n");
    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.diagnostics[0].message.contains("block scalar"));
}

#[test]
fn test_quoted_strings_never_infer() {
    let value = parsed("a: '123'\nb: \"true\"\nc: 'null'\n");
    assert_eq!(value.get("a"), Some(&Value::String("123".to_string())));
    assert_eq!(value.get("b"), Some(&Value::String("true".to_string())));
    assert_eq!(value.get("c"), Some(&Value::String("null".to_string())));
}

#[test]
fn test_serialized_output_is_valid_yaml() {
    let value = parsed(
        "name: demo\nitems:\n  - id: 1\n    tag: 'on'\n  - id: 2\n    tag: off\nempty: []\n",
    );
    let text = emit(&value, YamlStyle::default());

    let reference: serde_yaml::Value = serde_yaml::from_str(&text).expect("well-formed YAML");
    assert_eq!(reference["name"], serde_yaml::Value::from("demo"));
    assert_eq!(reference["items"][0]["id"], serde_yaml::Value::from(1));
    // The quoted 'on' must come back as a string, not a boolean
    assert_eq!(reference["items"][0]["tag"], serde_yaml::Value::from("on"));
}

#[test]
fn test_round_trip_preserves_structure() {
    let original = "a: 1\nb:\n  - x\n  - 'null'\nc:\n  nested: true\n";
    let value = parsed(original);
    let text = emit(&value, YamlStyle::default());
    let reparsed = parsed(&text);
    assert_eq!(value, reparsed);
}

#[test]
fn test_flow_threshold_round_trips() {
    let style = YamlStyle {
        flow_style_threshold: 3,
        ..YamlStyle::default()
    };
    // The root always stays in block style; the small collections
    // inside drop to flow.
    let value = parsed("pair: {x: 1, y: 2}\nlist: [1, 2, 3]\nname: demo\nmore: 1\n");
    let text = emit(&value, style);
    assert_eq!(
        text,
        "pair: {x: 1, y: 2}\nlist: [1, 2, 3]\nname: demo\nmore: 1\n"
    );
    assert_eq!(parsed(&text), value);
}

#[test]
fn test_quote_styles() {
    let value = Value::Object(vec![(
        "k".to_string(),
        Value::String("plain".to_string()),
    )]);
    let single = emit(
        &value,
        YamlStyle {
            quote_style: QuoteStyle::Single,
            ..YamlStyle::default()
        },
    );
    assert_eq!(single, "'k': 'plain'\n");
    let double = emit(
        &value,
        YamlStyle {
            quote_style: QuoteStyle::Double,
            ..YamlStyle::default()
        },
    );
    assert_eq!(double, "\"k\": \"plain\"\n");
}

#[test]
fn test_indent_width() {
    let style = YamlStyle {
        indent_width: 4,
        ..YamlStyle::default()
    };
    let value = parsed("outer:\n  inner: 1\n");
    assert_eq!(emit(&value, style), "outer:\n    inner: 1\n");
}

#[test]
fn test_unknown_alias_positioned() {
    let outcome = parse("a: 1\nb: *nope\n");
    assert_eq!(outcome.status, Status::Failed);
    let error = &outcome.diagnostics[0];
    assert_eq!(error.line, 2);
    assert!(error.message.contains("nope"));
}

//! CSV parse and serialize tests against the public API, including the
//! chunked parsing session.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use structconv::parser::{self, Format};
use structconv::serializer;
use structconv::{
    CancellationToken, CsvSession, CsvStyle, EngineConfig, Number, Severity, Status, StepStatus,
    Value,
};

fn parse_with(text: &str, csv: CsvStyle) -> structconv::ParseOutcome {
    let config = EngineConfig::default().with_csv(csv);
    parser::parse(text, Format::Csv, &config)
}

fn parse(text: &str) -> structconv::ParseOutcome {
    parse_with(text, CsvStyle::default())
}

fn parsed(text: &str) -> Value {
    let outcome = parse(text);
    assert_eq!(outcome.status, Status::Success, "{:?}", outcome.diagnostics);
    outcome.value.unwrap()
}

#[test]
fn test_header_rows_become_objects() {
    let value = parsed("id,name,active\n1,Ada,true\n2,Bob,false\n");
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("id"), Some(&Value::Number(Number::from_i64(1))));
    assert_eq!(rows[0].get("name"), Some(&Value::String("Ada".to_string())));
    assert_eq!(rows[1].get("active"), Some(&Value::Bool(false)));
}

#[test]
fn test_headerless_rows_become_arrays() {
    let style = CsvStyle {
        has_header_row: false,
        ..CsvStyle::default()
    };
    let outcome = parse_with("1,x\n2,y\n", style);
    let value = outcome.value.unwrap();
    let rows = value.as_array().unwrap();
    assert_matches!(&rows[0], Value::Array(cells) if cells.len() == 2);
}

#[test]
fn test_type_inference_is_conservative() {
    let value = parsed("a,b,c,d,e\n1.5,007,true,,text\n");
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.get("a"), Some(&Value::Number(Number::from_literal("1.5"))));
    // Leading zeros stay strings: "007" is an identifier, not a number
    assert_eq!(row.get("b"), Some(&Value::String("007".to_string())));
    assert_eq!(row.get("c"), Some(&Value::Bool(true)));
    assert_eq!(row.get("d"), Some(&Value::Null));
    assert_eq!(row.get("e"), Some(&Value::String("text".to_string())));
}

#[test]
fn test_quoted_cells_never_infer() {
    let value = parsed("a,b,c\n\"1\",\"true\",\"\"\n");
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.get("a"), Some(&Value::String("1".to_string())));
    assert_eq!(row.get("b"), Some(&Value::String("true".to_string())));
    assert_eq!(row.get("c"), Some(&Value::String(String::new())));
}

#[test]
fn test_quoted_cells_with_embedded_structure() {
    let value = parsed("a,b\n\"x,y\",\"say \"\"hi\"\"\"\n");
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.get("a"), Some(&Value::String("x,y".to_string())));
    assert_eq!(row.get("b"), Some(&Value::String("say \"hi\"".to_string())));
}

#[test]
fn test_multiline_quoted_cell() {
    let value = parsed("a\n\"two\nlines\"\n");
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.get("a"), Some(&Value::String("two\nlines".to_string())));
}

#[test]
fn test_short_row_padded_with_warning() {
    let outcome = parse("a,b,c\n1,2\n");
    assert_eq!(outcome.status, Status::Success);
    let value = outcome.value.unwrap();
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.get("c"), Some(&Value::Null));
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn test_long_row_truncated_with_warning() {
    let outcome = parse("a,b\n1,2,3\n");
    let value = outcome.value.unwrap();
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.as_object().unwrap().len(), 2);
    assert!(outcome.diagnostics[0].message.contains("record 1"));
}

#[test]
fn test_unterminated_quote_skips_record() {
    let outcome = parse("a,b\n\"open,2\n3,4\n");
    // The malformed record is skipped; parsing continues
    assert_eq!(outcome.status, Status::Success);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("skipped")));
}

#[test]
fn test_custom_delimiter_and_null() {
    let style = CsvStyle {
        delimiter: ';',
        null_representation: "NULL".to_string(),
        ..CsvStyle::default()
    };
    let outcome = parse_with("a;b\nNULL;x\n", style);
    let value = outcome.value.unwrap();
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.get("a"), Some(&Value::Null));
    assert_eq!(row.get("b"), Some(&Value::String("x".to_string())));
}

#[test]
fn test_crlf_line_endings() {
    let value = parsed("a,b\r\n1,2\r\n");
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[test]
fn test_round_trip_csv() {
    let original = "id,name\n1,Ada\n2,\"say \"\"hi\"\"\"\n";
    let value = parsed(original);
    let config = EngineConfig::default();
    let text = serializer::serialize(&value, Format::Csv, &config)
        .text
        .unwrap();
    assert_eq!(parsed(&text), value);
}

#[test]
fn test_headerless_round_trip() {
    let style = CsvStyle {
        has_header_row: false,
        ..CsvStyle::default()
    };
    let config = EngineConfig::default().with_csv(style.clone());
    let value = parse_with("1,x\n2,y\n", style.clone()).value.unwrap();
    let text = serializer::serialize(&value, Format::Csv, &config)
        .text
        .unwrap();
    assert_eq!(text, "1,x\n2,y\n");
    assert_eq!(parse_with(&text, style).value.unwrap(), value);
}

#[test]
fn test_cancellation_between_records() {
    let mut text = String::from("id\n");
    for i in 0..50 {
        text.push_str(&format!("{}\n", i));
    }
    let token = CancellationToken::new();
    token.cancel();
    let config = EngineConfig::default();
    let outcome = parser::parse_with_cancellation(&text, Format::Csv, &config, &token);
    assert_eq!(outcome.status, Status::Cancelled);
    assert!(outcome.value.is_none());
}

#[test]
fn test_session_incremental_parse() {
    let mut text = String::from("id,name\n");
    for i in 0..25 {
        text.push_str(&format!("{},row{}\n", i, i));
    }

    let mut session = CsvSession::new(text.clone(), CsvStyle::default());
    let mut yields = 0;
    while session.step(5) == StepStatus::Running {
        yields += 1;
        assert!(yields < 50, "session failed to terminate");
    }
    let chunked = session.finish();
    assert_eq!(chunked.status, Status::Success);

    let blocking = parse(&text);
    assert_eq!(chunked.value, blocking.value);
    assert_eq!(chunked.diagnostics, blocking.diagnostics);
}

#[test]
fn test_session_cancel_reports_only_processed_work() {
    let text = "a,b\nshort\n1,2\nalso-short\n";
    let token = CancellationToken::new();
    let mut session =
        CsvSession::new(text, CsvStyle::default()).with_cancellation(token.clone());

    // Header plus the first two data records
    assert_eq!(session.step(3), StepStatus::Running);
    token.cancel();
    assert_eq!(session.step(10), StepStatus::Cancelled);

    let outcome = session.finish();
    assert_eq!(outcome.status, Status::Cancelled);
    // One warning for the first short record, one cancellation marker;
    // the fourth record was never reached.
    assert_eq!(outcome.diagnostics.len(), 2);
}

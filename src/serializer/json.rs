//! JSON serializer
//!
//! Every canonical tree has a JSON rendering. Numbers are written from
//! their preserved literal text when that text is itself valid JSON, so a
//! value that came from JSON re-serializes with the digits it arrived
//! with. Literals from laxer grammars (YAML's `007`, `+1`, `.5`, `1.`)
//! are rewritten to their minimal JSON form with a `LossyConversion`
//! warning, never copied verbatim into output the JSON parser would
//! reject.

use crate::conversion::config::{JsonIndent, JsonStyle};
use crate::error::Diagnostic;
use crate::serializer::SerializeOutcome;
use crate::value::{Number, Value};

/// Render `value` as JSON text.
pub fn to_json(value: &Value, style: &JsonStyle) -> SerializeOutcome {
    let mut out = String::new();
    let mut diagnostics = Vec::new();
    write_value(&mut out, value, style, 0, &mut diagnostics);
    if style.trailing_newline {
        out.push('\n');
    }
    SerializeOutcome::success(out, diagnostics)
}

fn write_value(
    out: &mut String,
    value: &Value,
    style: &JsonStyle,
    level: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n, diagnostics),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => write_array(out, items, style, level, diagnostics),
        Value::Object(entries) => write_object(out, entries, style, level, diagnostics),
    }
}

/// A literal inside the JSON number grammar passes through verbatim;
/// anything else is rewritten from its parsed double.
fn write_number(out: &mut String, n: &Number, diagnostics: &mut Vec<Diagnostic>) {
    if n.is_json_literal() {
        out.push_str(n.literal());
    } else if n.as_f64().is_finite() {
        let normalized = Number::from_f64(n.as_f64());
        diagnostics.push(Diagnostic::lossy_conversion(format!(
            "number literal {} is outside the JSON grammar, rewritten as {}",
            n.literal(),
            normalized.literal()
        )));
        out.push_str(normalized.literal());
    } else {
        diagnostics.push(Diagnostic::lossy_conversion(format!(
            "number literal {} has no JSON representation, rewritten as null",
            n.literal()
        )));
        out.push_str("null");
    }
}

fn write_array(
    out: &mut String,
    items: &[Value],
    style: &JsonStyle,
    level: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline_indent(out, style, level + 1);
        write_value(out, item, style, level + 1, diagnostics);
    }
    newline_indent(out, style, level);
    out.push(']');
}

fn write_object(
    out: &mut String,
    entries: &[(String, Value)],
    style: &JsonStyle,
    level: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if entries.is_empty() {
        out.push_str("{}");
        return;
    }

    // Stable sort: duplicate keys keep their relative document order.
    let mut ordered: Vec<&(String, Value)> = entries.iter().collect();
    if style.sort_keys {
        ordered.sort_by(|a, b| a.0.cmp(&b.0));
    }

    out.push('{');
    for (i, (key, value)) in ordered.iter().map(|e| (&e.0, &e.1)).enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline_indent(out, style, level + 1);
        write_string(out, key);
        out.push(':');
        if !matches!(style.indent, JsonIndent::Minify) {
            out.push(' ');
        }
        write_value(out, value, style, level + 1, diagnostics);
    }
    newline_indent(out, style, level);
    out.push('}');
}

fn newline_indent(out: &mut String, style: &JsonStyle, level: usize) {
    match style.indent {
        JsonIndent::Minify => {}
        JsonIndent::Spaces(width) => {
            out.push('\n');
            for _ in 0..(level * width as usize) {
                out.push(' ');
            }
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

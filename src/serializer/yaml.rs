//! YAML serializer
//!
//! Block style by default; nested collections at or under the configured
//! flow threshold render inline. Quoting is the load-bearing part: a string
//! that reads back as null, a boolean, or a number must be quoted, or a
//! round trip would change its type. Empty collections always render
//! inline since block form cannot express them.

use crate::conversion::config::{QuoteStyle, YamlStyle};
use crate::value::Value;

/// Render `value` as YAML text. Always ends with a newline.
///
/// The document root does not participate in the flow threshold: a
/// non-empty root collection always renders in block style, and the
/// threshold governs nested collections only.
pub fn to_yaml(value: &Value, style: &YamlStyle) -> String {
    let mut out = String::new();
    match value {
        Value::Array(items) if !items.is_empty() => {
            write_block_sequence(&mut out, items, style, 0);
        }
        Value::Object(entries) if !entries.is_empty() => {
            write_block_mapping(&mut out, entries, style, 0);
        }
        other => {
            write_inline(&mut out, other, style);
            out.push('\n');
        }
    }
    out
}

/// Whether a collection should render in flow style.
fn use_flow(value: &Value, style: &YamlStyle) -> bool {
    match value {
        Value::Array(items) => items.len() <= style.flow_style_threshold,
        Value::Object(entries) => entries.len() <= style.flow_style_threshold,
        _ => true,
    }
}

fn is_inline(value: &Value, style: &YamlStyle) -> bool {
    match value {
        Value::Array(items) => items.is_empty() || use_flow(value, style),
        Value::Object(entries) => entries.is_empty() || use_flow(value, style),
        _ => true,
    }
}

fn write_block_sequence(out: &mut String, items: &[Value], style: &YamlStyle, level: usize) {
    for item in items {
        indent(out, style, level);
        if is_inline(item, style) {
            out.push_str("- ");
            write_inline(out, item, style);
            out.push('\n');
        } else {
            out.push_str("-\n");
            write_block(out, item, style, level + 1);
        }
    }
}

fn write_block_mapping(
    out: &mut String,
    entries: &[(String, Value)],
    style: &YamlStyle,
    level: usize,
) {
    for (key, value) in entries {
        indent(out, style, level);
        write_scalar_string(out, key, style);
        out.push(':');
        if is_inline(value, style) {
            out.push(' ');
            write_inline(out, value, style);
            out.push('\n');
        } else {
            out.push('\n');
            write_block(out, value, style, level + 1);
        }
    }
}

fn write_block(out: &mut String, value: &Value, style: &YamlStyle, level: usize) {
    match value {
        Value::Array(items) => write_block_sequence(out, items, style, level),
        Value::Object(entries) => write_block_mapping(out, entries, style, level),
        _ => {}
    }
}

/// Render a value with no line breaks: scalars, and collections in flow
/// style.
fn write_inline(out: &mut String, value: &Value, style: &YamlStyle) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(n.literal()),
        Value::String(s) => write_scalar_string(out, s, style),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline(out, item, style);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_scalar_string(out, key, style);
                out.push_str(": ");
                write_inline(out, value, style);
            }
            out.push('}');
        }
    }
}

fn indent(out: &mut String, style: &YamlStyle, level: usize) {
    for _ in 0..(level * style.indent_width as usize) {
        out.push(' ');
    }
}

fn write_scalar_string(out: &mut String, s: &str, style: &YamlStyle) {
    match style.quote_style {
        QuoteStyle::Double => write_double_quoted(out, s),
        QuoteStyle::Single => {
            if needs_double_quotes(s) {
                write_double_quoted(out, s);
            } else {
                write_single_quoted(out, s);
            }
        }
        QuoteStyle::Auto => {
            if needs_double_quotes(s) {
                write_double_quoted(out, s);
            } else if needs_quoting(s) {
                write_single_quoted(out, s);
            } else {
                out.push_str(s);
            }
        }
    }
}

/// Whether a plain rendering of `s` would parse back as something other
/// than this exact string.
fn needs_quoting(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    match s {
        "~" | "null" | "Null" | "NULL" | "true" | "True" | "TRUE" | "false" | "False"
        | "FALSE" => return true,
        _ => {}
    }
    if looks_numeric(s) {
        return true;
    }
    if s.starts_with(' ') || s.ends_with(' ') {
        return true;
    }
    let first = match s.chars().next() {
        Some(c) => c,
        None => return true,
    };
    if matches!(
        first,
        '-' | '?' | ':' | ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\''
            | '"' | '%' | '@' | '`'
    ) {
        return true;
    }
    // A colon-space or space-hash sequence would split the scalar.
    s.contains(": ") || s.ends_with(':') || s.contains(" #")
}

/// Single quotes cannot express control characters.
fn needs_double_quotes(s: &str) -> bool {
    s.chars().any(|c| (c as u32) < 0x20)
}

fn looks_numeric(s: &str) -> bool {
    let body = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);
    !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && body.chars().any(|c| c.is_ascii_digit())
}

fn write_single_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
}

fn write_double_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
}

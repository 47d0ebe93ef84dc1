//! CSV serializer
//!
//! CSV is the one target that cannot represent every canonical tree. The
//! supported shapes are an array of objects (header from the union of
//! keys, first-seen order) and an array of arrays (headerless rows).
//! Anything else is an `UnsupportedConversion` error. Nested values
//! inside cells flatten to minified JSON with a `LossyConversion`
//! warning per cell.
//!
//! String cells that would read back as a different type (a number, a
//! boolean, the null representation) are quoted, because quoted cells
//! are never type-inferred on input.

use crate::conversion::config::{CsvStyle, JsonIndent, JsonStyle};
use crate::error::Diagnostic;
use crate::parser::csv::is_unambiguous_number;
use crate::serializer::json::to_json;
use crate::serializer::SerializeOutcome;
use crate::value::Value;

/// Render `value` as CSV text.
pub fn to_csv(value: &Value, style: &CsvStyle) -> SerializeOutcome {
    let rows = match value {
        Value::Array(rows) => rows,
        other => {
            return SerializeOutcome::failure(vec![Diagnostic::unsupported_conversion(format!(
                "cannot convert {} to CSV: expected an array of objects or an array of arrays",
                other.kind_name()
            ))]);
        }
    };

    if rows.is_empty() {
        return SerializeOutcome::success(String::new(), Vec::new());
    }

    if rows.iter().all(|row| matches!(row, Value::Object(_))) {
        to_csv_records(rows, style)
    } else if rows.iter().all(|row| matches!(row, Value::Array(_))) {
        to_csv_rows(rows, style)
    } else {
        SerializeOutcome::failure(vec![Diagnostic::unsupported_conversion(
            "cannot convert mixed or scalar array elements to CSV rows",
        )])
    }
}

/// Array of objects: header is the union of keys in first-seen order;
/// missing cells render as the null representation.
fn to_csv_records(rows: &[Value], style: &CsvStyle) -> SerializeOutcome {
    let mut header: Vec<&str> = Vec::new();
    for row in rows {
        if let Some(entries) = row.as_object() {
            for (key, _) in entries {
                if !header.iter().any(|h| *h == key.as_str()) {
                    header.push(key.as_str());
                }
            }
        }
    }

    let mut out = String::new();
    let mut diagnostics = Vec::new();

    if style.has_header_row {
        for (i, key) in header.iter().enumerate() {
            if i > 0 {
                out.push(style.delimiter);
            }
            write_text_cell(&mut out, key, style);
        }
        out.push('\n');
    }

    for (row_index, row) in rows.iter().enumerate() {
        for (i, key) in header.iter().enumerate() {
            if i > 0 {
                out.push(style.delimiter);
            }
            match row.get(key) {
                Some(cell) => {
                    write_cell(&mut out, cell, style, &mut diagnostics, row_index, key)
                }
                None => out.push_str(&style.null_representation),
            }
        }
        out.push('\n');
    }

    SerializeOutcome::success(out, diagnostics)
}

/// Array of arrays: one record per row, no header.
fn to_csv_rows(rows: &[Value], style: &CsvStyle) -> SerializeOutcome {
    let mut out = String::new();
    let mut diagnostics = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        if let Some(cells) = row.as_array() {
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    out.push(style.delimiter);
                }
                let column = (i + 1).to_string();
                write_cell(&mut out, cell, style, &mut diagnostics, row_index, &column);
            }
        }
        out.push('\n');
    }

    SerializeOutcome::success(out, diagnostics)
}

fn write_cell(
    out: &mut String,
    cell: &Value,
    style: &CsvStyle,
    diagnostics: &mut Vec<Diagnostic>,
    row_index: usize,
    column: &str,
) {
    match cell {
        Value::Null => out.push_str(&style.null_representation),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(n.literal()),
        Value::String(s) => write_text_cell(out, s, style),
        nested @ (Value::Array(_) | Value::Object(_)) => {
            let minified = JsonStyle {
                indent: JsonIndent::Minify,
                sort_keys: false,
                trailing_newline: false,
            };
            let mut embedded = to_json(nested, &minified);
            diagnostics.append(&mut embedded.diagnostics);
            diagnostics.push(Diagnostic::lossy_conversion(format!(
                "row {}, column {}: nested {} flattened to an embedded JSON string",
                row_index + 1,
                column,
                nested.kind_name()
            )));
            write_quoted_cell(out, embedded.text.as_deref().unwrap_or_default(), style);
        }
    }
}

/// Write a string cell, quoting when the raw text would be misread.
fn write_text_cell(out: &mut String, text: &str, style: &CsvStyle) {
    if needs_quoting(text, style) {
        write_quoted_cell(out, text, style);
    } else {
        out.push_str(text);
    }
}

fn write_quoted_cell(out: &mut String, text: &str, style: &CsvStyle) {
    out.push(style.quote_char);
    for c in text.chars() {
        if c == style.quote_char {
            out.push(style.quote_char);
        }
        out.push(c);
    }
    out.push(style.quote_char);
}

fn needs_quoting(text: &str, style: &CsvStyle) -> bool {
    if text.contains(style.delimiter)
        || text.contains(style.quote_char)
        || text.contains('\n')
        || text.contains('\r')
    {
        return true;
    }
    if text.starts_with(' ') || text.ends_with(' ') {
        return true;
    }
    // A plain rendering of these would type-infer on the way back in.
    if text == style.null_representation || text == "true" || text == "false" {
        return true;
    }
    is_unambiguous_number(text)
}

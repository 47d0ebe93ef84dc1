//! CSV parser
//!
//! RFC-4180 quoting with a configurable delimiter and quote character.
//! With a header row, each data record becomes an `Object` keyed by header;
//! without one, records become `Array`s. A malformed record is skipped with
//! a `Warning` and parsing continues; it never aborts the document.

use crate::conversion::cancel::CancellationToken;
use crate::conversion::config::CsvStyle;
use crate::error::{Diagnostic, ParseOutcome};
use crate::parser::Cursor;
use crate::value::{Number, Value};

/// One field of a record. Quoted fields bypass type inference: `"007"`
/// is a string on the way in and stays one on the way out.
#[derive(Debug, Clone)]
pub(crate) struct CsvField {
    pub text: String,
    pub quoted: bool,
}

/// Result of reading one physical record.
#[derive(Debug)]
pub(crate) enum RecordResult {
    Record(Vec<CsvField>),
    /// The record could not be read (unterminated quote, stray quote); the
    /// diagnostic names the position and the reader has skipped past it.
    Malformed(Diagnostic),
}

/// Read the next record, or `None` at end of input. Empty lines are
/// skipped.
pub(crate) fn read_record(
    cur: &mut Cursor<'_>,
    delimiter: char,
    quote: char,
) -> Option<RecordResult> {
    loop {
        if cur.is_eof() {
            return None;
        }

        // Skip blank lines between records.
        if cur.eat('\n') {
            continue;
        }
        if cur.peek() == Some('\r') && cur.peek_second() == Some('\n') {
            cur.bump();
            cur.bump();
            continue;
        }

        let mut fields = Vec::new();
        loop {
            match read_field(cur, delimiter, quote) {
                Ok(field) => fields.push(field),
                Err(diagnostic) => {
                    skip_to_next_line(cur);
                    return Some(RecordResult::Malformed(diagnostic));
                }
            }

            if cur.eat(delimiter) {
                continue;
            }
            // End of record: newline, CRLF, or EOF.
            if cur.peek() == Some('\r') && cur.peek_second() == Some('\n') {
                cur.bump();
                cur.bump();
            } else {
                cur.eat('\n');
            }
            return Some(RecordResult::Record(fields));
        }
    }
}

fn read_field(
    cur: &mut Cursor<'_>,
    delimiter: char,
    quote: char,
) -> Result<CsvField, Diagnostic> {
    if cur.peek() == Some(quote) {
        read_quoted_field(cur, quote)
    } else {
        let mut text = String::new();
        while let Some(c) = cur.peek() {
            if c == delimiter || c == '\n' {
                break;
            }
            if c == '\r' && cur.peek_second() == Some('\n') {
                break;
            }
            text.push(c);
            cur.bump();
        }
        Ok(CsvField {
            text,
            quoted: false,
        })
    }
}

fn read_quoted_field(cur: &mut Cursor<'_>, quote: char) -> Result<CsvField, Diagnostic> {
    let start = cur.error_here("unterminated quoted field");
    cur.bump(); // opening quote
    let mut text = String::new();

    loop {
        match cur.bump() {
            Some(c) if c == quote => {
                // Doubled quote is an escaped quote; anything else ends
                // the field.
                if cur.peek() == Some(quote) {
                    cur.bump();
                    text.push(quote);
                } else {
                    return Ok(CsvField { text, quoted: true });
                }
            }
            Some(c) => text.push(c),
            None => return Err(start),
        }
    }
}

fn skip_to_next_line(cur: &mut Cursor<'_>) {
    while let Some(c) = cur.bump() {
        if c == '\n' {
            break;
        }
    }
}

/// Whether an unquoted cell is an unambiguous numeric literal. The JSON
/// number grammar is exactly the conservative subset wanted here: leading
/// zeros disqualify (`007` must stay a string), as do empty integer or
/// fraction parts.
pub(crate) fn is_unambiguous_number(text: &str) -> bool {
    crate::value::is_json_number(text)
}

/// Infer a canonical value from one cell. Quoted cells are always
/// strings; unquoted cells are typed only when unambiguous.
pub(crate) fn infer_cell(field: &CsvField, null_representation: &str) -> Value {
    if field.quoted {
        return Value::String(field.text.clone());
    }
    if field.text == null_representation || field.text.is_empty() {
        return Value::Null;
    }
    match field.text.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        text if is_unambiguous_number(text) => Value::Number(Number::from_literal(text)),
        text => Value::String(text.to_string()),
    }
}

/// Incremental assembly of the document tree from records. Shared by the
/// blocking parser and the resumable [`super::session::CsvSession`].
#[derive(Debug)]
pub(crate) struct CsvDocumentBuilder {
    style: CsvStyle,
    header: Option<Vec<String>>,
    rows: Vec<Value>,
    diagnostics: Vec<Diagnostic>,
    /// 1-based index of the next data record.
    record_index: usize,
}

impl CsvDocumentBuilder {
    pub(crate) fn new(style: CsvStyle) -> Self {
        Self {
            style,
            header: None,
            rows: Vec::new(),
            diagnostics: Vec::new(),
            record_index: 0,
        }
    }

    pub(crate) fn push_record(&mut self, record: RecordResult) {
        let fields = match record {
            RecordResult::Record(fields) => fields,
            RecordResult::Malformed(mut diagnostic) => {
                if self.style.has_header_row && self.header.is_none() {
                    // The header slot stays open, so the next well-formed
                    // record is promoted to header. Say so.
                    diagnostic.message = format!(
                        "header record skipped: {}; the next record becomes the header",
                        diagnostic.message
                    );
                } else {
                    self.record_index += 1;
                    diagnostic.message = format!(
                        "record {} skipped: {}",
                        self.record_index, diagnostic.message
                    );
                }
                // Recoverable: the record is dropped, not the document.
                diagnostic.severity = crate::error::Severity::Warning;
                self.diagnostics.push(diagnostic);
                return;
            }
        };

        if self.style.has_header_row && self.header.is_none() {
            self.header = Some(fields.into_iter().map(|f| f.text).collect());
            return;
        }

        self.record_index += 1;
        match &self.header {
            Some(header) => {
                if fields.len() != header.len() {
                    self.diagnostics.push(Diagnostic::syntax_warning(
                        format!(
                            "record {} has {} fields, expected {}",
                            self.record_index,
                            fields.len(),
                            header.len()
                        ),
                        0,
                        0,
                        0,
                    ));
                }
                let mut entries = Vec::with_capacity(header.len());
                for (i, key) in header.iter().enumerate() {
                    // Short records pad with Null, long ones truncate;
                    // either way the mismatch was just reported.
                    let value = match fields.get(i) {
                        Some(field) => infer_cell(field, &self.style.null_representation),
                        None => Value::Null,
                    };
                    entries.push((key.clone(), value));
                }
                self.rows.push(Value::Object(entries));
            }
            None => {
                let items = fields
                    .iter()
                    .map(|f| infer_cell(f, &self.style.null_representation))
                    .collect();
                self.rows.push(Value::Array(items));
            }
        }
    }

    pub(crate) fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn finish(self) -> (Value, Vec<Diagnostic>) {
        (Value::Array(self.rows), self.diagnostics)
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Parse a CSV document. Total: malformed records become warnings, never
/// aborts. The cancellation token is checked between records.
pub fn parse_csv(
    text: &str,
    style: &CsvStyle,
    token: Option<&CancellationToken>,
) -> ParseOutcome {
    let mut cur = Cursor::new(text);
    let mut builder = CsvDocumentBuilder::new(style.clone());

    loop {
        if let Some(token) = token {
            if token.is_cancelled() {
                let mut diagnostics = builder.into_diagnostics();
                diagnostics.push(Diagnostic::cancelled(
                    cur.line(),
                    cur.column(),
                    cur.offset(),
                ));
                return ParseOutcome::cancelled(diagnostics);
            }
        }

        match read_record(&mut cur, style.delimiter, style.quote_char) {
            Some(record) => builder.push_record(record),
            None => break,
        }
    }

    let (value, diagnostics) = builder.finish();
    ParseOutcome::success(value, diagnostics)
}

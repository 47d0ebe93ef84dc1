//! Format parsers: text in, canonical value plus diagnostics out
//!
//! Parsing is total. Lexical and structural failures become
//! `Error`-severity diagnostics with exact line/column positions;
//! recoverable problems (a malformed CSV record, a duplicate JSON key)
//! become `Warning`s and parsing continues. Nothing panics past this
//! module's boundary.

pub mod csv;
pub mod json;
pub mod session;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::conversion::cancel::CancellationToken;
use crate::conversion::config::EngineConfig;
use crate::error::{Diagnostic, ParseOutcome};

/// The formats the engine understands. Closed by construction: an unknown
/// format is unrepresentable rather than a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Csv,
}

impl Format {
    /// Infer a format from a file extension, for the CLI.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "csv" => Ok(Format::Csv),
            other => Err(format!(
                "unknown format '{}', expected json, yaml, or csv",
                other
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Parse `text` as `format` into a canonical value.
pub fn parse(text: &str, format: Format, config: &EngineConfig) -> ParseOutcome {
    parse_inner(text, format, config, None)
}

/// Like [`parse`], but checks the token at yield points (each CSV record,
/// each top-level JSON array element, each top-level YAML block entry) and
/// aborts cleanly when cancelled.
pub fn parse_with_cancellation(
    text: &str,
    format: Format,
    config: &EngineConfig,
    token: &CancellationToken,
) -> ParseOutcome {
    parse_inner(text, format, config, Some(token))
}

fn parse_inner(
    text: &str,
    format: Format,
    config: &EngineConfig,
    token: Option<&CancellationToken>,
) -> ParseOutcome {
    match format {
        Format::Json => json::parse_json(text, config.rules.max_depth, token),
        Format::Yaml => yaml::parse_yaml(text, config.rules.max_depth, token),
        Format::Csv => csv::parse_csv(text, &config.csv, token),
    }
}

/// A character cursor over source text that tracks line, column, and byte
/// offset. Lines and columns are 1-based; the offset is 0-based.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Resume at a previously saved position. Used by the chunked parsing
    /// session, which cannot hold a borrow across suspensions.
    pub(crate) fn at(input: &'a str, offset: usize, line: usize, column: usize) -> Self {
        Self {
            input,
            offset,
            line,
            column,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    pub(crate) fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.offset..].chars();
        chars.next();
        chars.next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume the next character if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn column(&self) -> usize {
        self.column
    }

    /// Source slice between two offsets.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Skip spaces, tabs, carriage returns and newlines.
    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.bump();
        }
    }

    /// Build a syntax error anchored at the current position.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::syntax_error(message, self.line, self.column, self.offset)
    }
}

//! Hand-written recursive-descent JSON parser
//!
//! Exists because the engine's contract rules out an off-the-shelf parser:
//! duplicate object keys must survive as distinct entries, numeric literals
//! must be preserved verbatim, and failures must surface as positioned
//! diagnostics rather than a single opaque error.

use std::collections::HashSet;

use crate::conversion::cancel::CancellationToken;
use crate::error::{Diagnostic, ParseOutcome};
use crate::parser::Cursor;
use crate::value::{Number, Value};

/// Why parsing stopped early. The corresponding diagnostic has already
/// been recorded when one of these is returned.
enum Halt {
    Error,
    Cancelled,
}

struct JsonParser<'a, 't> {
    cur: Cursor<'a>,
    diagnostics: Vec<Diagnostic>,
    max_depth: usize,
    token: Option<&'t CancellationToken>,
}

/// Parse a JSON document. Total: all failures land in the outcome.
pub fn parse_json(
    text: &str,
    max_depth: usize,
    token: Option<&CancellationToken>,
) -> ParseOutcome {
    let mut parser = JsonParser {
        cur: Cursor::new(text),
        diagnostics: Vec::new(),
        max_depth,
        token,
    };
    parser.parse_document()
}

impl<'a, 't> JsonParser<'a, 't> {
    fn parse_document(mut self) -> ParseOutcome {
        self.cur.skip_whitespace();
        if self.cur.is_eof() {
            self.diagnostics.push(self.cur.error_here("empty document"));
            return ParseOutcome::failure(self.diagnostics);
        }

        match self.parse_value(1) {
            Ok(value) => {
                self.cur.skip_whitespace();
                if !self.cur.is_eof() {
                    self.diagnostics.push(
                        self.cur
                            .error_here("unexpected trailing characters after document"),
                    );
                    return ParseOutcome::failure(self.diagnostics);
                }
                ParseOutcome::success(value, self.diagnostics)
            }
            Err(Halt::Error) => ParseOutcome::failure(self.diagnostics),
            Err(Halt::Cancelled) => ParseOutcome::cancelled(self.diagnostics),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, Halt> {
        if depth > self.max_depth {
            self.diagnostics.push(self.cur.error_here(format!(
                "maximum nesting depth ({}) exceeded",
                self.max_depth
            )));
            return Err(Halt::Error);
        }

        match self.cur.peek() {
            Some('{') => self.parse_object(depth),
            Some('[') => self.parse_array(depth),
            Some('"') => self.parse_string().map(Value::String),
            Some('t') | Some('f') => self.parse_keyword(),
            Some('n') => self.parse_keyword(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) => {
                self.diagnostics
                    .push(self.cur.error_here(format!("expected value, found '{}'", c)));
                Err(Halt::Error)
            }
            None => {
                self.diagnostics
                    .push(self.cur.error_here("expected value, found end of input"));
                Err(Halt::Error)
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, Halt> {
        self.cur.bump(); // '{'
        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        self.cur.skip_whitespace();
        if self.cur.eat('}') {
            return Ok(Value::Object(entries));
        }

        loop {
            self.cur.skip_whitespace();
            let (key_line, key_col, key_off) =
                (self.cur.line(), self.cur.column(), self.cur.offset());
            if self.cur.peek() != Some('"') {
                self.diagnostics
                    .push(self.cur.error_here("expected object key string"));
                return Err(Halt::Error);
            }
            let key = self.parse_string()?;

            // Duplicate keys are retained as distinct entries for
            // round-trip fidelity, but flagged.
            if !seen.insert(key.clone()) {
                self.diagnostics.push(Diagnostic::syntax_warning(
                    format!("duplicate object key \"{}\"", key),
                    key_line,
                    key_col,
                    key_off,
                ));
            }

            self.cur.skip_whitespace();
            if !self.cur.eat(':') {
                self.diagnostics
                    .push(self.cur.error_here("expected ':' after object key"));
                return Err(Halt::Error);
            }

            self.cur.skip_whitespace();
            let value = self.parse_value(depth + 1)?;
            entries.push((key, value));

            self.cur.skip_whitespace();
            if self.cur.eat(',') {
                continue;
            }
            if self.cur.eat('}') {
                return Ok(Value::Object(entries));
            }
            self.diagnostics
                .push(self.cur.error_here("expected ',' or '}' in object"));
            return Err(Halt::Error);
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, Halt> {
        self.cur.bump(); // '['
        let mut items = Vec::new();

        self.cur.skip_whitespace();
        if self.cur.eat(']') {
            return Ok(Value::Array(items));
        }

        loop {
            // Yield point: a top-level array's element boundaries.
            if depth == 1 {
                if let Some(token) = self.token {
                    if token.is_cancelled() {
                        self.diagnostics.push(Diagnostic::cancelled(
                            self.cur.line(),
                            self.cur.column(),
                            self.cur.offset(),
                        ));
                        return Err(Halt::Cancelled);
                    }
                }
            }

            self.cur.skip_whitespace();
            let value = self.parse_value(depth + 1)?;
            items.push(value);

            self.cur.skip_whitespace();
            if self.cur.eat(',') {
                continue;
            }
            if self.cur.eat(']') {
                return Ok(Value::Array(items));
            }
            self.diagnostics
                .push(self.cur.error_here("expected ',' or ']' in array"));
            return Err(Halt::Error);
        }
    }

    fn parse_keyword(&mut self) -> Result<Value, Halt> {
        let start = self.cur.offset();
        let (line, col) = (self.cur.line(), self.cur.column());
        while matches!(self.cur.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.cur.bump();
        }
        let word = self.cur.slice(start, self.cur.offset());
        match word {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            other => {
                self.diagnostics.push(Diagnostic::syntax_error(
                    format!("invalid literal '{}'", other),
                    line,
                    col,
                    start,
                ));
                Err(Halt::Error)
            }
        }
    }

    /// Scan a numeric literal per the JSON grammar and keep its text
    /// verbatim, so large integers never round through a float.
    fn parse_number(&mut self) -> Result<Value, Halt> {
        let start = self.cur.offset();
        let (line, col) = (self.cur.line(), self.cur.column());

        self.cur.eat('-');
        if self.cur.eat('0') {
            // No leading zeros in JSON
        } else if matches!(self.cur.peek(), Some(c) if c.is_ascii_digit()) {
            while matches!(self.cur.peek(), Some(c) if c.is_ascii_digit()) {
                self.cur.bump();
            }
        } else {
            self.diagnostics.push(Diagnostic::syntax_error(
                "invalid number: expected digit",
                line,
                col,
                start,
            ));
            return Err(Halt::Error);
        }

        if self.cur.eat('.') {
            if !matches!(self.cur.peek(), Some(c) if c.is_ascii_digit()) {
                self.diagnostics
                    .push(self.cur.error_here("invalid number: expected fraction digits"));
                return Err(Halt::Error);
            }
            while matches!(self.cur.peek(), Some(c) if c.is_ascii_digit()) {
                self.cur.bump();
            }
        }

        if matches!(self.cur.peek(), Some('e' | 'E')) {
            self.cur.bump();
            if matches!(self.cur.peek(), Some('+' | '-')) {
                self.cur.bump();
            }
            if !matches!(self.cur.peek(), Some(c) if c.is_ascii_digit()) {
                self.diagnostics
                    .push(self.cur.error_here("invalid number: expected exponent digits"));
                return Err(Halt::Error);
            }
            while matches!(self.cur.peek(), Some(c) if c.is_ascii_digit()) {
                self.cur.bump();
            }
        }

        let literal = self.cur.slice(start, self.cur.offset());
        Ok(Value::Number(Number::from_literal(literal)))
    }

    fn parse_string(&mut self) -> Result<String, Halt> {
        self.cur.bump(); // opening quote
        let mut out = String::new();

        loop {
            match self.cur.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.cur.bump() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('/') => out.push('/'),
                    Some('b') => out.push('\u{0008}'),
                    Some('f') => out.push('\u{000C}'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('u') => {
                        let code = self.parse_unicode_escape()?;
                        out.push(code);
                    }
                    Some(c) => {
                        self.diagnostics
                            .push(self.cur.error_here(format!("invalid escape '\\{}'", c)));
                        return Err(Halt::Error);
                    }
                    None => {
                        self.diagnostics
                            .push(self.cur.error_here("unterminated string"));
                        return Err(Halt::Error);
                    }
                },
                Some(c) if (c as u32) < 0x20 => {
                    self.diagnostics
                        .push(self.cur.error_here("unescaped control character in string"));
                    return Err(Halt::Error);
                }
                Some(c) => out.push(c),
                None => {
                    self.diagnostics
                        .push(self.cur.error_here("unterminated string"));
                    return Err(Halt::Error);
                }
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, Halt> {
        let high = self.parse_hex4()?;

        // Surrogate pair handling
        if (0xD800..0xDC00).contains(&high) {
            if self.cur.eat('\\') && self.cur.eat('u') {
                let low = self.parse_hex4()?;
                if (0xDC00..0xE000).contains(&low) {
                    let combined =
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    if let Some(c) = char::from_u32(combined) {
                        return Ok(c);
                    }
                }
            }
            self.diagnostics
                .push(self.cur.error_here("invalid surrogate pair in \\u escape"));
            return Err(Halt::Error);
        }

        match char::from_u32(high) {
            Some(c) => Ok(c),
            None => {
                self.diagnostics
                    .push(self.cur.error_here("invalid \\u escape"));
                Err(Halt::Error)
            }
        }
    }

    fn parse_hex4(&mut self) -> Result<u32, Halt> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = match self.cur.bump() {
                Some(c) => c.to_digit(16),
                None => None,
            };
            match digit {
                Some(d) => code = code * 16 + d,
                None => {
                    self.diagnostics
                        .push(self.cur.error_here("invalid \\u escape: expected 4 hex digits"));
                    return Err(Halt::Error);
                }
            }
        }
        Ok(code)
    }
}

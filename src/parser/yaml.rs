//! YAML parser
//!
//! Covers the subset a conversion tool meets in practice: block and flow
//! mappings/sequences, plain and quoted scalars, comments, explicit core
//! tags, and anchors/aliases. Aliases resolve to independent copies, so
//! the canonical tree never contains shared references; an alias that
//! would close a cycle is a diagnostic, not a crash. Flow collections
//! must close on the line they open. Literal (`|`) and folded (`>`)
//! block scalars are not supported.

use std::collections::{HashMap, HashSet};

use crate::conversion::cancel::CancellationToken;
use crate::error::{Diagnostic, ParseOutcome};
use crate::value::{Number, Value};

enum Halt {
    Error,
    Cancelled,
}

/// One logical source line: comments stripped, trailing space removed,
/// blank lines dropped.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    indent: usize,
    content: &'a str,
    line_no: usize,
    /// Byte offset of the first content character in the source.
    offset: usize,
}

/// 1-based column of a byte position within a line's content. Columns
/// count characters, not bytes, so positions stay accurate on lines with
/// multibyte text; the byte offset keeps the raw arithmetic.
fn column_of(line: Line<'_>, col_in_content: usize) -> usize {
    let chars = match line.content.get(..col_in_content) {
        Some(prefix) => prefix.chars().count(),
        None => col_in_content,
    };
    line.indent + chars + 1
}

struct YamlParser<'a, 't> {
    lines: Vec<Line<'a>>,
    idx: usize,
    diagnostics: Vec<Diagnostic>,
    max_depth: usize,
    token: Option<&'t CancellationToken>,
    anchors: HashMap<String, Value>,
    /// Anchors whose values are still being built; an alias to one of
    /// these would introduce a cycle.
    in_progress: HashSet<String>,
}

/// Parse a YAML document. Total: all failures land in the outcome.
pub fn parse_yaml(
    text: &str,
    max_depth: usize,
    token: Option<&CancellationToken>,
) -> ParseOutcome {
    let mut diagnostics = Vec::new();
    let lines = match split_lines(text, &mut diagnostics) {
        Ok(lines) => lines,
        Err(()) => return ParseOutcome::failure(diagnostics),
    };

    let parser = YamlParser {
        lines,
        idx: 0,
        diagnostics,
        max_depth,
        token,
        anchors: HashMap::new(),
        in_progress: HashSet::new(),
    };
    parser.parse_document()
}

/// Split source into logical lines, stripping comments outside quotes.
fn split_lines<'a>(
    text: &'a str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Line<'a>>, ()> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for (line_no, raw) in text.split('\n').enumerate() {
        let line_no = line_no + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);

        let mut indent = 0;
        for c in raw.chars() {
            match c {
                ' ' => indent += 1,
                '\t' => {
                    diagnostics.push(Diagnostic::syntax_error(
                        "tab character in indentation",
                        line_no,
                        indent + 1,
                        offset + indent,
                    ));
                    return Err(());
                }
                _ => break,
            }
        }

        let content = strip_comment(&raw[indent..]);
        let content = content.trim_end();
        if !content.is_empty() {
            lines.push(Line {
                indent,
                content,
                line_no,
                offset: offset + indent,
            });
        }

        offset += raw.len() + 1;
    }

    Ok(lines)
}

/// Cut a trailing comment: `#` outside quotes, at line start or after
/// whitespace.
fn strip_comment(content: &str) -> &str {
    let bytes = content.as_bytes();
    let mut in_single = false;
    let mut in_double = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' if !in_double => in_single = !in_single,
            b'"' if !in_single => {
                if in_double && i > 0 && bytes[i - 1] == b'\\' {
                    // escaped quote inside double-quoted scalar
                } else {
                    in_double = !in_double;
                }
            }
            b'#' if !in_single && !in_double => {
                if i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t' {
                    return content[..i].trim_end();
                }
            }
            _ => {}
        }
        i += 1;
    }
    content
}

impl<'a, 't> YamlParser<'a, 't> {
    fn parse_document(mut self) -> ParseOutcome {
        // Leading document marker is allowed; multiple documents are not.
        if matches!(self.current(), Some(line) if line.content == "---") {
            self.idx += 1;
        }

        if self.current().is_none() {
            return ParseOutcome::success(Value::Null, self.diagnostics);
        }

        match self.parse_block(1) {
            Ok(value) => {
                if let Some(line) = self.current() {
                    let message = if line.content == "---" {
                        "multiple YAML documents are not supported".to_string()
                    } else {
                        "unexpected content after document".to_string()
                    };
                    let diagnostic = Diagnostic::syntax_error(
                        message,
                        line.line_no,
                        line.indent + 1,
                        line.offset,
                    );
                    self.diagnostics.push(diagnostic);
                    return ParseOutcome::failure(self.diagnostics);
                }
                ParseOutcome::success(value, self.diagnostics)
            }
            Err(Halt::Error) => ParseOutcome::failure(self.diagnostics),
            Err(Halt::Cancelled) => ParseOutcome::cancelled(self.diagnostics),
        }
    }

    fn current(&self) -> Option<Line<'a>> {
        self.lines.get(self.idx).copied()
    }

    fn error_at(&mut self, line: Line<'a>, col_in_content: usize, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::syntax_error(
            message,
            line.line_no,
            column_of(line, col_in_content),
            line.offset + col_in_content,
        ));
    }

    fn check_depth(&mut self, line: Line<'a>, depth: usize) -> Result<(), Halt> {
        if depth > self.max_depth {
            self.error_at(
                line,
                0,
                format!("maximum nesting depth ({}) exceeded", self.max_depth),
            );
            return Err(Halt::Error);
        }
        Ok(())
    }

    fn check_cancelled(&mut self, line: Line<'a>, depth: usize) -> Result<(), Halt> {
        if depth == 1 {
            if let Some(token) = self.token {
                if token.is_cancelled() {
                    self.diagnostics.push(Diagnostic::cancelled(
                        line.line_no,
                        line.indent + 1,
                        line.offset,
                    ));
                    return Err(Halt::Cancelled);
                }
            }
        }
        Ok(())
    }

    /// Parse the block node starting at the current line, whose indent
    /// defines the block's base.
    fn parse_block(&mut self, depth: usize) -> Result<Value, Halt> {
        let line = match self.current() {
            Some(line) => line,
            None => return Ok(Value::Null),
        };
        self.check_depth(line, depth)?;

        if is_sequence_item(line.content) {
            self.parse_sequence(line.indent, depth)
        } else if find_mapping_colon(line.content).is_some() {
            self.parse_mapping(line.indent, depth)
        } else {
            // A single scalar (or flow collection) document node.
            self.idx += 1;
            self.parse_rest(line.content, line, 0, line.indent, depth, false)
        }
    }

    fn parse_sequence(&mut self, base: usize, depth: usize) -> Result<Value, Halt> {
        let mut items = Vec::new();

        while let Some(line) = self.current() {
            if line.indent != base || !is_sequence_item(line.content) {
                if line.indent > base {
                    self.error_at(line, 0, "unexpected indentation in sequence");
                    return Err(Halt::Error);
                }
                break;
            }
            self.check_cancelled(line, depth)?;

            let rest = if line.content == "-" {
                ""
            } else {
                line.content[2..].trim_start()
            };
            let rest_col = line.content.len() - rest.len();

            if rest.is_empty() {
                self.idx += 1;
                let item = match self.current() {
                    Some(next) if next.indent > base => self.parse_block(depth + 1)?,
                    _ => Value::Null,
                };
                items.push(item);
            } else if is_sequence_item(rest) || find_mapping_colon(rest).is_some() {
                // Compact form: the item's node begins on the marker line.
                // Reinterpret the line as starting at the item's column and
                // let block parsing take over.
                self.lines[self.idx] = Line {
                    indent: base + rest_col,
                    content: rest,
                    line_no: line.line_no,
                    offset: line.offset + rest_col,
                };
                items.push(self.parse_block(depth + 1)?);
            } else {
                self.idx += 1;
                let item = self.parse_rest(rest, line, rest_col, base, depth + 1, false)?;
                items.push(item);
            }
        }

        Ok(Value::Array(items))
    }

    fn parse_mapping(&mut self, base: usize, depth: usize) -> Result<Value, Halt> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        while let Some(line) = self.current() {
            if line.indent != base {
                if line.indent > base {
                    self.error_at(line, 0, "unexpected indentation in mapping");
                    return Err(Halt::Error);
                }
                break;
            }
            if is_sequence_item(line.content) {
                break;
            }
            self.check_cancelled(line, depth)?;

            let colon = match find_mapping_colon(line.content) {
                Some(pos) => pos,
                None => {
                    self.error_at(line, 0, "expected 'key: value' mapping entry");
                    return Err(Halt::Error);
                }
            };

            let key_text = line.content[..colon].trim_end();
            let key = match self.parse_key(key_text, line)? {
                Some(key) => key,
                None => return Err(Halt::Error),
            };
            if !seen.insert(key.clone()) {
                self.diagnostics.push(Diagnostic::syntax_warning(
                    format!("duplicate mapping key \"{}\"", key),
                    line.line_no,
                    line.indent + 1,
                    line.offset,
                ));
            }

            let rest = line.content[colon + 1..].trim_start();
            let rest_col = line.content.len() - rest.len();
            self.idx += 1;

            let value = if rest.is_empty() {
                match self.current() {
                    Some(next) if next.indent > base => self.parse_block(depth + 1)?,
                    // A sequence may sit at the same indent as its key.
                    Some(next) if next.indent == base && is_sequence_item(next.content) => {
                        self.parse_sequence(base, depth + 1)?
                    }
                    _ => Value::Null,
                }
            } else {
                self.parse_rest(rest, line, rest_col, base, depth + 1, true)?
            };
            entries.push((key, value));
        }

        Ok(Value::Object(entries))
    }

    fn parse_key(&mut self, key_text: &str, line: Line<'a>) -> Result<Option<String>, Halt> {
        if key_text.is_empty() {
            self.error_at(line, 0, "empty mapping key");
            return Ok(None);
        }
        if let Some(stripped) = key_text.strip_prefix('"') {
            match parse_double_quoted(stripped) {
                Some((key, rest)) if rest.is_empty() => return Ok(Some(key)),
                _ => {
                    self.error_at(line, 0, "malformed quoted mapping key");
                    return Ok(None);
                }
            }
        }
        if let Some(stripped) = key_text.strip_prefix('\'') {
            match parse_single_quoted(stripped) {
                Some((key, rest)) if rest.is_empty() => return Ok(Some(key)),
                _ => {
                    self.error_at(line, 0, "malformed quoted mapping key");
                    return Ok(None);
                }
            }
        }
        Ok(Some(key_text.to_string()))
    }

    /// Parse the remainder of a line in value position: optional anchor and
    /// tag, then an alias, a flow collection, a scalar, or nothing (in
    /// which case the value is the following indented block).
    fn parse_rest(
        &mut self,
        rest: &'a str,
        line: Line<'a>,
        col: usize,
        parent_indent: usize,
        depth: usize,
        allow_same_indent_seq: bool,
    ) -> Result<Value, Halt> {
        self.check_depth(line, depth)?;

        let mut remaining = rest;
        let mut col = col;
        let mut anchor: Option<String> = None;
        let mut tag: Option<&'a str> = None;

        loop {
            if let Some(stripped) = remaining.strip_prefix('&') {
                let (name, after) = split_token(stripped);
                if name.is_empty() {
                    self.error_at(line, col, "anchor name missing after '&'");
                    return Err(Halt::Error);
                }
                anchor = Some(name.to_string());
                col += remaining.len() - after.trim_start().len();
                remaining = after.trim_start();
            } else if remaining.starts_with('!') {
                let (token, after) = split_token(remaining);
                tag = Some(token);
                col += remaining.len() - after.trim_start().len();
                remaining = after.trim_start();
            } else {
                break;
            }
        }

        if let Some(stripped) = remaining.strip_prefix('*') {
            let (name, after) = split_token(stripped);
            if !after.trim().is_empty() {
                self.error_at(line, col, "unexpected content after alias");
                return Err(Halt::Error);
            }
            return self.resolve_alias(name, line, col);
        }

        if remaining.starts_with('|') || remaining.starts_with('>') {
            self.error_at(line, col, "literal and folded block scalars are not supported");
            return Err(Halt::Error);
        }

        let value = if remaining.is_empty() {
            // Anchored or tagged block node on the following lines.
            if let Some(name) = &anchor {
                self.in_progress.insert(name.clone());
            }
            let block = match self.current() {
                Some(next) if next.indent > parent_indent => self.parse_block(depth)?,
                Some(next)
                    if allow_same_indent_seq
                        && next.indent == parent_indent
                        && is_sequence_item(next.content) =>
                {
                    self.parse_sequence(parent_indent, depth)?
                }
                _ => Value::Null,
            };
            if let Some(name) = &anchor {
                self.in_progress.remove(name);
            }
            block
        } else if remaining.starts_with('[') || remaining.starts_with('{') {
            let mut flow = FlowCursor {
                text: remaining,
                pos: 0,
            };
            let value = self.parse_flow(&mut flow, line, col, depth)?;
            flow.skip_spaces();
            if !flow.at_end() {
                self.error_at(
                    line,
                    col + flow.pos,
                    "unexpected content after flow collection",
                );
                return Err(Halt::Error);
            }
            value
        } else {
            self.parse_scalar_text(remaining, line, col)?
        };

        let value = match tag {
            Some(tag) => self.apply_tag(tag, value, line, col)?,
            None => value,
        };
        if let Some(name) = anchor {
            self.anchors.insert(name, value.clone());
        }
        Ok(value)
    }

    fn resolve_alias(&mut self, name: &str, line: Line<'a>, col: usize) -> Result<Value, Halt> {
        if name.is_empty() {
            self.error_at(line, col, "alias name missing after '*'");
            return Err(Halt::Error);
        }
        if self.in_progress.contains(name) {
            self.error_at(
                line,
                col,
                format!("alias '*{}' would create a reference cycle", name),
            );
            return Err(Halt::Error);
        }
        match self.anchors.get(name) {
            // Independent copy: the canonical tree has no shared nodes.
            Some(value) => Ok(value.clone()),
            None => {
                self.error_at(line, col, format!("unknown alias '*{}'", name));
                Err(Halt::Error)
            }
        }
    }

    fn apply_tag(
        &mut self,
        tag: &str,
        value: Value,
        line: Line<'a>,
        col: usize,
    ) -> Result<Value, Halt> {
        let scalar_text = |value: &Value| -> String {
            match value {
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.literal().to_string(),
                Value::String(s) => s.clone(),
                _ => String::new(),
            }
        };

        match tag {
            "!!str" => Ok(Value::String(scalar_text(&value))),
            "!!null" => Ok(Value::Null),
            "!!bool" => match scalar_text(&value).as_str() {
                "true" | "True" | "TRUE" => Ok(Value::Bool(true)),
                "false" | "False" | "FALSE" => Ok(Value::Bool(false)),
                other => {
                    self.error_at(line, col, format!("'{}' is not a valid !!bool", other));
                    Err(Halt::Error)
                }
            },
            "!!int" => {
                let text = scalar_text(&value);
                if text.parse::<i64>().is_ok() {
                    Ok(Value::Number(Number::from_literal(&text)))
                } else {
                    self.error_at(line, col, format!("'{}' is not a valid !!int", text));
                    Err(Halt::Error)
                }
            }
            "!!float" => {
                let text = scalar_text(&value);
                if text.parse::<f64>().is_ok() {
                    Ok(Value::Number(Number::from_literal(&text)))
                } else {
                    self.error_at(line, col, format!("'{}' is not a valid !!float", text));
                    Err(Halt::Error)
                }
            }
            other => {
                self.diagnostics.push(Diagnostic::syntax_warning(
                    format!("ignoring unsupported tag '{}'", other),
                    line.line_no,
                    column_of(line, col),
                    line.offset + col,
                ));
                Ok(value)
            }
        }
    }

    fn parse_scalar_text(
        &mut self,
        text: &str,
        line: Line<'a>,
        col: usize,
    ) -> Result<Value, Halt> {
        if let Some(stripped) = text.strip_prefix('"') {
            return match parse_double_quoted(stripped) {
                Some((value, rest)) if rest.trim().is_empty() => Ok(Value::String(value)),
                Some(_) => {
                    self.error_at(line, col, "unexpected content after quoted scalar");
                    Err(Halt::Error)
                }
                None => {
                    self.error_at(line, col, "unterminated double-quoted scalar");
                    Err(Halt::Error)
                }
            };
        }
        if let Some(stripped) = text.strip_prefix('\'') {
            return match parse_single_quoted(stripped) {
                Some((value, rest)) if rest.trim().is_empty() => Ok(Value::String(value)),
                Some(_) => {
                    self.error_at(line, col, "unexpected content after quoted scalar");
                    Err(Halt::Error)
                }
                None => {
                    self.error_at(line, col, "unterminated single-quoted scalar");
                    Err(Halt::Error)
                }
            };
        }
        Ok(resolve_plain_scalar(text))
    }

    /// Parse a flow node: `[...]`, `{...}`, quoted or plain scalar, or an
    /// alias. Flow collections must close on the line they open.
    fn parse_flow(
        &mut self,
        flow: &mut FlowCursor<'a>,
        line: Line<'a>,
        col: usize,
        depth: usize,
    ) -> Result<Value, Halt> {
        self.check_depth(line, depth)?;
        flow.skip_spaces();

        match flow.peek() {
            Some('[') => {
                flow.pos += 1;
                let mut items = Vec::new();
                loop {
                    flow.skip_spaces();
                    if flow.peek() == Some(']') {
                        flow.pos += 1;
                        return Ok(Value::Array(items));
                    }
                    items.push(self.parse_flow(flow, line, col, depth + 1)?);
                    flow.skip_spaces();
                    match flow.peek() {
                        Some(',') => flow.pos += 1,
                        Some(']') => {}
                        _ => {
                            self.error_at(
                                line,
                                col + flow.pos,
                                "expected ',' or ']' in flow sequence",
                            );
                            return Err(Halt::Error);
                        }
                    }
                }
            }
            Some('{') => {
                flow.pos += 1;
                let mut entries = Vec::new();
                loop {
                    flow.skip_spaces();
                    if flow.peek() == Some('}') {
                        flow.pos += 1;
                        return Ok(Value::Object(entries));
                    }
                    let key = match self.parse_flow(flow, line, col, depth + 1)? {
                        Value::String(s) => s,
                        Value::Number(n) => n.literal().to_string(),
                        Value::Bool(b) => b.to_string(),
                        Value::Null => String::new(),
                        _ => {
                            self.error_at(
                                line,
                                col + flow.pos,
                                "collection keys are not supported in flow mappings",
                            );
                            return Err(Halt::Error);
                        }
                    };
                    flow.skip_spaces();
                    if flow.peek() != Some(':') {
                        self.error_at(
                            line,
                            col + flow.pos,
                            "expected ':' in flow mapping entry",
                        );
                        return Err(Halt::Error);
                    }
                    flow.pos += 1;
                    let value = self.parse_flow(flow, line, col, depth + 1)?;
                    entries.push((key, value));
                    flow.skip_spaces();
                    match flow.peek() {
                        Some(',') => flow.pos += 1,
                        Some('}') => {}
                        _ => {
                            self.error_at(
                                line,
                                col + flow.pos,
                                "expected ',' or '}' in flow mapping",
                            );
                            return Err(Halt::Error);
                        }
                    }
                }
            }
            Some('"') => {
                flow.pos += 1;
                match parse_double_quoted(flow.remaining()) {
                    Some((value, rest)) => {
                        flow.pos = flow.text.len() - rest.len();
                        Ok(Value::String(value))
                    }
                    None => {
                        self.error_at(line, col + flow.pos, "unterminated double-quoted scalar");
                        Err(Halt::Error)
                    }
                }
            }
            Some('\'') => {
                flow.pos += 1;
                match parse_single_quoted(flow.remaining()) {
                    Some((value, rest)) => {
                        flow.pos = flow.text.len() - rest.len();
                        Ok(Value::String(value))
                    }
                    None => {
                        self.error_at(line, col + flow.pos, "unterminated single-quoted scalar");
                        Err(Halt::Error)
                    }
                }
            }
            Some('*') => {
                flow.pos += 1;
                let start = flow.pos;
                while let Some(c) = flow.peek() {
                    if matches!(c, ' ' | ',' | ']' | '}' | ':') {
                        break;
                    }
                    flow.pos += c.len_utf8();
                }
                let name = flow.text[start..flow.pos].to_string();
                self.resolve_alias(&name, line, col + start)
            }
            Some(_) => {
                let start = flow.pos;
                while let Some(c) = flow.peek() {
                    if matches!(c, ',' | ']' | '}' | ':') {
                        break;
                    }
                    flow.pos += c.len_utf8();
                }
                let text = flow.text[start..flow.pos].trim();
                Ok(resolve_plain_scalar(text))
            }
            None => {
                self.error_at(
                    line,
                    col + flow.pos,
                    "flow collection must close on the same line",
                );
                Err(Halt::Error)
            }
        }
    }
}

/// Cursor over the flow portion of a single line.
struct FlowCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> FlowCursor<'a> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }
}

fn is_sequence_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// Position of the colon separating key from value, outside quotes and
/// flow brackets, followed by a space or end of line.
fn find_mapping_colon(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut in_single = false;
    let mut in_double = false;
    let mut bracket_depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' if !in_double => in_single = !in_single,
            b'"' if !in_single => {
                if !(in_double && i > 0 && bytes[i - 1] == b'\\') {
                    in_double = !in_double;
                }
            }
            b'[' | b'{' if !in_single && !in_double => bracket_depth += 1,
            b']' | b'}' if !in_single && !in_double => {
                bracket_depth = bracket_depth.saturating_sub(1)
            }
            b':' if !in_single && !in_double && bracket_depth == 0 => {
                if i + 1 == bytes.len() || bytes[i + 1] == b' ' {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split off a run of non-space characters (an anchor, alias, or tag
/// token) from the rest of the line.
fn split_token(text: &str) -> (&str, &str) {
    match text.find(' ') {
        Some(pos) => (&text[..pos], &text[pos..]),
        None => (text, ""),
    }
}

/// Resolve an unquoted scalar per the YAML core schema.
fn resolve_plain_scalar(text: &str) -> Value {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => return Value::Null,
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        _ => {}
    }
    if is_yaml_number(text) {
        return Value::Number(Number::from_literal(text));
    }
    Value::String(text.to_string())
}

fn is_yaml_number(text: &str) -> bool {
    let body = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    if body.is_empty() {
        return false;
    }
    let mut digits = 0;
    let mut dot = false;
    let mut exp = false;
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '0'..='9' => digits += 1,
            '.' if !dot && !exp => dot = true,
            'e' | 'E' if !exp && digits > 0 => {
                exp = true;
                if matches!(chars.peek(), Some('+' | '-')) {
                    chars.next();
                }
                if chars.peek().is_none() {
                    return false;
                }
                digits = 0;
            }
            _ => return false,
        }
    }
    digits > 0
}

/// Parse the body of a double-quoted scalar (opening quote consumed).
/// Returns the value and the text after the closing quote.
fn parse_double_quoted(text: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((out, &text[i + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, '0')) => out.push('\0'),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return None,
            },
            c => out.push(c),
        }
    }
    None
}

/// Parse the body of a single-quoted scalar (opening quote consumed).
/// A doubled quote is an escaped quote.
fn parse_single_quoted(text: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < text.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                out.push('\'');
                i += 2;
            } else {
                return Some((out, &text[i + 1..]));
            }
        } else {
            let c = text[i..].chars().next()?;
            out.push(c);
            i += c.len_utf8();
        }
    }
    None
}

//! Canonical value model shared by all parsers and serializers
//!
//! Every format parses into a [`Value`] and every serializer consumes one,
//! so adding a format never requires format-to-format glue. The tree is
//! immutable once built; transforms produce new trees or text.

use std::fmt;

/// A numeric value that preserves its original textual form.
///
/// Re-serializing a parsed document must not alter precision, so the literal
/// text is the source of truth and the `f64` is a best-effort companion for
/// computation. Equality compares literals, which is what round-trip
/// fidelity requires.
#[derive(Debug, Clone)]
pub struct Number {
    literal: String,
    parsed: f64,
}

impl Number {
    /// Create a number from its source literal, keeping the text verbatim.
    pub fn from_literal(literal: &str) -> Self {
        let parsed = literal.parse::<f64>().unwrap_or(f64::NAN);
        Self {
            literal: literal.to_string(),
            parsed,
        }
    }

    /// Create a number from an integer.
    pub fn from_i64(value: i64) -> Self {
        Self {
            literal: value.to_string(),
            parsed: value as f64,
        }
    }

    /// Create a number from a double. Non-finite values have no canonical
    /// literal, so callers should avoid them.
    pub fn from_f64(value: f64) -> Self {
        Self {
            literal: format_f64(value),
            parsed: value,
        }
    }

    /// The original literal text, exactly as parsed.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Best-effort double representation.
    pub fn as_f64(&self) -> f64 {
        self.parsed
    }

    /// Exact integer representation, when the literal is one.
    pub fn as_i64(&self) -> Option<i64> {
        self.literal.parse::<i64>().ok()
    }

    /// Whether the literal is an integer within `i64` range.
    pub fn is_integer(&self) -> bool {
        self.as_i64().is_some()
    }

    /// Whether the literal conforms to the JSON number grammar. YAML and
    /// hand-built numbers may carry forms JSON forbids (`007`, `+1`,
    /// `.5`, `1.`); those must be normalized before landing in JSON text.
    pub fn is_json_literal(&self) -> bool {
        is_json_number(&self.literal)
    }
}

/// Strict JSON number grammar: optional minus, no leading zeros, fraction
/// and exponent parts require digits.
pub(crate) fn is_json_number(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    if chars.peek() == Some(&'-') {
        chars.next();
    }

    let mut int_digits = 0;
    let mut leading_zero = false;
    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        if int_digits == 0 && chars.peek() == Some(&'0') {
            leading_zero = true;
        }
        int_digits += 1;
        chars.next();
    }
    if int_digits == 0 {
        return false;
    }
    if leading_zero && int_digits > 1 {
        return false;
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let mut frac_digits = 0;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            frac_digits += 1;
            chars.next();
        }
        if frac_digits == 0 {
            return false;
        }
    }

    if matches!(chars.peek(), Some('e' | 'E')) {
        chars.next();
        if matches!(chars.peek(), Some('+' | '-')) {
            chars.next();
        }
        let mut exp_digits = 0;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            exp_digits += 1;
            chars.next();
        }
        if exp_digits == 0 {
            return false;
        }
    }

    chars.next().is_none()
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal
    }
}

impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Render a double in its minimal form (no trailing zeros, no `.0`).
fn format_f64(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// The format-agnostic tree all parsers produce and all serializers consume.
///
/// An explicit sum type rather than a dynamic map: every consumer must
/// exhaustively handle all kinds, which is the defense against silently
/// mishandling shapes like CSV-embedded JSON strings.
///
/// `Object` is a sequence of pairs, not a map: insertion order is
/// significant and duplicate keys are retained as distinct entries. The
/// validator flags duplicates; the model does not forbid them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Human-readable kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// First value for a key, honoring insertion order.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Maximum nesting depth of the tree. A scalar has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Value::Object(entries) => {
                1 + entries.iter().map(|(_, v)| v.depth()).max().unwrap_or(0)
            }
            _ => 1,
        }
    }
}

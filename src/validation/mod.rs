//! Structural validation
//!
//! Validation walks an already-parsed tree and reports rule violations as
//! diagnostics with JSON-path locations (`$.users[3].name`). It never
//! mutates the value and never raises; depth violations are errors, the
//! advisory rules are warnings.

use std::collections::HashSet;

use crate::conversion::cancel::CancellationToken;
use crate::conversion::config::{EngineConfig, ValidationRules};
use crate::error::{Diagnostic, ParseOutcome, Severity, ValidationOutcome};
use crate::parser::{self, Format};
use crate::value::Value;

/// Check `value` against the configured rules.
pub fn validate(value: &Value, rules: &ValidationRules) -> ValidationOutcome {
    let mut checker = Checker {
        rules,
        diagnostics: Vec::new(),
        path: String::from("$"),
    };
    checker.check(value, 1);
    ValidationOutcome {
        diagnostics: checker.diagnostics,
    }
}

/// Parse `text` and validate the result; parse diagnostics come first.
pub fn validate_text(text: &str, format: Format, config: &EngineConfig) -> ValidationOutcome {
    validate_text_inner(text, format, config, None)
}

/// Like [`validate_text`], with cooperative cancellation of the parse.
pub fn validate_text_with_cancellation(
    text: &str,
    format: Format,
    config: &EngineConfig,
    token: &CancellationToken,
) -> ValidationOutcome {
    validate_text_inner(text, format, config, Some(token))
}

fn validate_text_inner(
    text: &str,
    format: Format,
    config: &EngineConfig,
    token: Option<&CancellationToken>,
) -> ValidationOutcome {
    let parsed: ParseOutcome = match token {
        Some(token) => parser::parse_with_cancellation(text, format, config, token),
        None => parser::parse(text, format, config),
    };
    let mut diagnostics = parsed.diagnostics;
    if let Some(value) = parsed.value {
        diagnostics.extend(validate(&value, &config.rules).diagnostics);
    }
    ValidationOutcome { diagnostics }
}

struct Checker<'a> {
    rules: &'a ValidationRules,
    diagnostics: Vec<Diagnostic>,
    path: String,
}

impl Checker<'_> {
    fn check(&mut self, value: &Value, depth: usize) {
        if depth > self.rules.max_depth {
            self.diagnostics.push(Diagnostic::validation(
                Severity::Error,
                format!(
                    "maximum nesting depth ({}) exceeded at {}",
                    self.rules.max_depth, self.path
                ),
            ));
            // No point descending further; every child would repeat this.
            return;
        }

        match value {
            Value::Array(items) => {
                if self.rules.uniform_rows {
                    self.check_row_shapes(items);
                }
                for (index, item) in items.iter().enumerate() {
                    let saved = self.path.len();
                    self.path.push_str(&format!("[{}]", index));
                    self.check(item, depth + 1);
                    self.path.truncate(saved);
                }
            }
            Value::Object(entries) => {
                if self.rules.duplicate_keys {
                    self.check_duplicate_keys(entries);
                }
                for (key, item) in entries {
                    let saved = self.path.len();
                    self.path.push('.');
                    self.path.push_str(key);
                    self.check(item, depth + 1);
                    self.path.truncate(saved);
                }
            }
            _ => {}
        }
    }

    fn check_duplicate_keys(&mut self, entries: &[(String, Value)]) {
        let mut seen: HashSet<&str> = HashSet::new();
        for (key, _) in entries {
            if !seen.insert(key) {
                self.diagnostics.push(Diagnostic::validation(
                    Severity::Warning,
                    format!("duplicate key \"{}\" at {}", key, self.path),
                ));
            }
        }
    }

    /// Arrays of objects are row sets; rows whose key set differs from the
    /// first row's are flagged.
    fn check_row_shapes(&mut self, items: &[Value]) {
        if items.len() < 2 || !items.iter().all(|v| matches!(v, Value::Object(_))) {
            return;
        }
        let first_keys = key_set(&items[0]);
        for (index, item) in items.iter().enumerate().skip(1) {
            if key_set(item) != first_keys {
                self.diagnostics.push(Diagnostic::validation(
                    Severity::Warning,
                    format!(
                        "row {} has a different set of keys than row 0 at {}",
                        index, self.path
                    ),
                ));
            }
        }
    }
}

fn key_set(value: &Value) -> HashSet<&str> {
    match value.as_object() {
        Some(entries) => entries.iter().map(|(k, _)| k.as_str()).collect(),
        None => HashSet::new(),
    }
}

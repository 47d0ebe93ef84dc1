//! Diagnostics and error infrastructure
//!
//! Bad input never raises: parsers, serializers and the validator report
//! every failure mode as a [`Diagnostic`] inside a result value. The only
//! fatal error type, [`EngineError`], is reserved for API misuse such as an
//! invalid configuration.

use serde::Serialize;

use crate::value::Value;

/// How serious a diagnostic is. Output is withheld whenever an
/// `Error`-severity diagnostic exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Malformed token or structure at a specific position.
    Syntax,
    /// The target format cannot represent the value's shape at all.
    UnsupportedConversion,
    /// Non-fatal degradation, e.g. nested structures flattened into
    /// embedded JSON strings.
    LossyConversion,
    /// Validation rule violation.
    Validation,
    /// Cooperative abort via a cancellation token.
    Cancelled,
}

/// A positioned, severity-tagged message describing a parse, validation or
/// serialization issue. Immutable once created.
///
/// `line` and `column` are 1-based; `byte_offset` is 0-based. Diagnostics
/// produced without source text (validation, serialization) carry zeroed
/// positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

impl Diagnostic {
    /// A syntax error at an exact source position.
    pub fn syntax_error(
        message: impl Into<String>,
        line: usize,
        column: usize,
        byte_offset: usize,
    ) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            severity: Severity::Error,
            message: message.into(),
            line,
            column,
            byte_offset,
        }
    }

    /// A recoverable syntax problem at an exact source position.
    pub fn syntax_warning(
        message: impl Into<String>,
        line: usize,
        column: usize,
        byte_offset: usize,
    ) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            severity: Severity::Warning,
            message: message.into(),
            line,
            column,
            byte_offset,
        }
    }

    /// The target format cannot represent the value's shape.
    pub fn unsupported_conversion(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnsupportedConversion,
            severity: Severity::Error,
            message: message.into(),
            line: 0,
            column: 0,
            byte_offset: 0,
        }
    }

    /// A documented, deterministic degradation was applied.
    pub fn lossy_conversion(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::LossyConversion,
            severity: Severity::Warning,
            message: message.into(),
            line: 0,
            column: 0,
            byte_offset: 0,
        }
    }

    /// A validation rule violation.
    pub fn validation(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Validation,
            severity,
            message: message.into(),
            line: 0,
            column: 0,
            byte_offset: 0,
        }
    }

    /// Parsing was aborted by a cancellation token.
    pub fn cancelled(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            kind: DiagnosticKind::Cancelled,
            severity: Severity::Error,
            message: "operation cancelled".to_string(),
            line,
            column,
            byte_offset,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render the diagnostic the way the CLI prints it.
    pub fn display_line(&self) -> String {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.line > 0 {
            format!(
                "{}: {} at line {}, column {}",
                label, self.message, self.line, self.column
            )
        } else {
            format!("{}: {}", label, self.message)
        }
    }
}

/// Terminal state of a parse or conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
    Cancelled,
}

/// Whether a diagnostic list contains an error.
pub fn has_error(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Result of parsing one document.
///
/// `value` is absent whenever an error-severity diagnostic exists: a
/// partially built tree is never exposed as if complete.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub value: Option<Value>,
    pub diagnostics: Vec<Diagnostic>,
    pub status: Status,
}

impl ParseOutcome {
    pub fn success(value: Value, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: Some(value),
            diagnostics,
            status: Status::Success,
        }
    }

    pub fn failure(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: None,
            diagnostics,
            status: Status::Failed,
        }
    }

    pub fn cancelled(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: None,
            diagnostics,
            status: Status::Cancelled,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Result of a conversion or formatting call.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub output: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub status: Status,
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Result of a validation-only call.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        !has_error(&self.diagnostics)
    }
}

/// Fatal errors reserved for programming-contract violations. Bad input
/// data never produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration: {message}")]
    Configuration { message: String },
}

impl EngineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

//! structconv: structured-data transcoding and validation
//!
//! Parses JSON, YAML, and CSV into one canonical value tree, optionally
//! validates it, and serializes back to any of the three formats. Every
//! failure mode on the data path is a positioned [`error::Diagnostic`]
//! inside an outcome value; the only fatal error is an invalid
//! configuration.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod serializer;
pub mod validation;
pub mod value;

// Re-export commonly used types
pub use conversion::{
    CancellationToken, ConversionEngine, CsvStyle, EngineConfig, JsonIndent, JsonStyle,
    QuoteStyle, ValidationRules, YamlStyle,
};
pub use error::{
    ConversionOutcome, Diagnostic, DiagnosticKind, EngineError, ParseOutcome, Severity, Status,
    ValidationOutcome,
};
pub use parser::{session::CsvSession, session::StepStatus, Format};
pub use value::{Number, Value};

/// Convert `text` between formats with default options.
pub fn convert(text: &str, from: Format, to: Format) -> ConversionOutcome {
    convert_with_config(text, from, to, &EngineConfig::default())
}

/// Convert `text` between formats with custom options.
///
/// An invalid configuration surfaces as a failed outcome here rather than
/// an [`EngineError`]; use [`ConversionEngine::new`] directly to
/// distinguish the two.
pub fn convert_with_config(
    text: &str,
    from: Format,
    to: Format,
    config: &EngineConfig,
) -> ConversionOutcome {
    match ConversionEngine::new(config.clone()) {
        Ok(engine) => engine.convert(text, from, to),
        Err(e) => ConversionOutcome {
            output: None,
            diagnostics: vec![Diagnostic::validation(Severity::Error, e.to_string())],
            status: Status::Failed,
        },
    }
}

/// Reformat `text` in place with default options.
pub fn format_text(text: &str, format: Format) -> ConversionOutcome {
    formatter::format_text(text, format, &EngineConfig::default())
}

/// Reformat `text` in place with custom options.
pub fn format_text_with_config(
    text: &str,
    format: Format,
    config: &EngineConfig,
) -> ConversionOutcome {
    formatter::format_text(text, format, config)
}

/// Parse and validate `text` with default options.
pub fn validate_text(text: &str, format: Format) -> ValidationOutcome {
    validation::validate_text(text, format, &EngineConfig::default())
}

/// Parse and validate `text` with custom options.
pub fn validate_text_with_config(
    text: &str,
    format: Format,
    config: &EngineConfig,
) -> ValidationOutcome {
    validation::validate_text(text, format, config)
}

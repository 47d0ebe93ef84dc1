//! Format serializers: canonical value in, text plus diagnostics out
//!
//! Serialization is deterministic: the same value and style options always
//! produce byte-identical output. JSON and YAML can represent every
//! canonical tree; CSV cannot, so its serializer reports unsupported
//! shapes as `Error` diagnostics and documented degradations (nested
//! values flattened to embedded JSON) as `Warning`s.

pub mod csv;
pub mod json;
pub mod yaml;

use crate::conversion::config::EngineConfig;
use crate::error::{has_error, Diagnostic};
use crate::parser::Format;
use crate::value::Value;

/// Result of serializing one value.
///
/// `text` is absent whenever an error-severity diagnostic exists.
#[derive(Debug, Clone)]
pub struct SerializeOutcome {
    pub text: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SerializeOutcome {
    pub fn success(text: String, diagnostics: Vec<Diagnostic>) -> Self {
        debug_assert!(!has_error(&diagnostics));
        Self {
            text: Some(text),
            diagnostics,
        }
    }

    pub fn failure(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            text: None,
            diagnostics,
        }
    }

    pub fn is_success(&self) -> bool {
        self.text.is_some()
    }
}

/// Render `value` as `format` using the matching style options.
pub fn serialize(value: &Value, format: Format, config: &EngineConfig) -> SerializeOutcome {
    match format {
        Format::Json => json::to_json(value, &config.json),
        Format::Yaml => SerializeOutcome::success(yaml::to_yaml(value, &config.yaml), Vec::new()),
        Format::Csv => csv::to_csv(value, &config.csv),
    }
}

//! Style options and engine configuration
//!
//! All option types are plain immutable values. The engine validates a
//! configuration once at construction; an invalid one is an API-misuse
//! error, never a diagnostic.

use serde::Serialize;

use crate::error::EngineError;

/// JSON indentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JsonIndent {
    /// Remove all insignificant whitespace.
    Minify,
    /// Indent with this many spaces per nesting level.
    Spaces(u8),
}

/// JSON rendering options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonStyle {
    pub indent: JsonIndent,
    /// Stable-sort object entries by key; duplicates keep relative order.
    pub sort_keys: bool,
    pub trailing_newline: bool,
}

impl Default for JsonStyle {
    fn default() -> Self {
        Self {
            indent: JsonIndent::Spaces(2),
            sort_keys: false,
            trailing_newline: true,
        }
    }
}

/// Scalar quoting strategy for YAML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Quote only when required, preferring single quotes.
    Auto,
    Single,
    Double,
}

/// YAML rendering options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YamlStyle {
    pub indent_width: u8,
    /// Collections at or under this size render inline (flow style).
    pub flow_style_threshold: usize,
    pub quote_style: QuoteStyle,
}

impl Default for YamlStyle {
    fn default() -> Self {
        Self {
            indent_width: 2,
            flow_style_threshold: 0,
            quote_style: QuoteStyle::Auto,
        }
    }
}

/// CSV dialect options, used by both the parser and the serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvStyle {
    pub delimiter: char,
    pub quote_char: char,
    /// When set, the first record is a header and data records become
    /// objects keyed by it; otherwise records become arrays.
    pub has_header_row: bool,
    /// Text standing in for `Null` cells on output; cells equal to it
    /// parse back to `Null`.
    pub null_representation: String,
}

impl Default for CsvStyle {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            has_header_row: true,
            null_representation: String::new(),
        }
    }
}

/// Structural validation rules applied by the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRules {
    /// Maximum nesting depth; bounds recursion on adversarial input.
    pub max_depth: usize,
    /// Report duplicate object keys.
    pub duplicate_keys: bool,
    /// Report arrays of objects whose rows expose differing key sets.
    pub uniform_rows: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_depth: 128,
            duplicate_keys: true,
            uniform_rows: true,
        }
    }
}

/// Full engine configuration: per-format styles plus validation rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineConfig {
    pub json: JsonStyle,
    pub yaml: YamlStyle,
    pub csv: CsvStyle,
    pub rules: ValidationRules,
    /// Run the validator between parse and serialize.
    pub validate: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, json: JsonStyle) -> Self {
        self.json = json;
        self
    }

    pub fn with_yaml(mut self, yaml: YamlStyle) -> Self {
        self.yaml = yaml;
        self
    }

    pub fn with_csv(mut self, csv: CsvStyle) -> Self {
        self.csv = csv;
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Check configuration consistency. Called by the engine constructor.
    pub fn validate_config(&self) -> Result<(), EngineError> {
        if let JsonIndent::Spaces(width) = self.json.indent {
            if width > 16 {
                return Err(EngineError::configuration(
                    "JSON indent width must be 0-16 spaces",
                ));
            }
        }
        if self.yaml.indent_width == 0 || self.yaml.indent_width > 16 {
            return Err(EngineError::configuration(
                "YAML indent width must be 1-16 spaces",
            ));
        }
        if self.csv.delimiter == self.csv.quote_char {
            return Err(EngineError::configuration(
                "CSV delimiter and quote character must differ",
            ));
        }
        if self.csv.delimiter == '\n' || self.csv.quote_char == '\n' {
            return Err(EngineError::configuration(
                "CSV delimiter and quote character must not be newlines",
            ));
        }
        if self.rules.max_depth == 0 {
            return Err(EngineError::configuration("max depth must be at least 1"));
        }
        Ok(())
    }
}

//! The conversion engine
//!
//! One validated configuration, reusable across any number of documents.
//! The engine owns no mutable state, so a single instance can serve
//! concurrent callers behind a shared reference.

use crate::conversion::cancel::CancellationToken;
use crate::conversion::config::EngineConfig;
use crate::error::{has_error, ConversionOutcome, EngineError, Status};
use crate::parser::{self, Format};
use crate::serializer;
use crate::validation;

/// A configured converter. Construction validates the configuration;
/// conversion itself never fails with an error value, only with
/// diagnostics in the outcome.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    config: EngineConfig,
}

impl ConversionEngine {
    /// Build an engine, rejecting inconsistent configurations up front.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate_config()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Convert `text` from one format to another (or the same one, which
    /// reformats it).
    pub fn convert(&self, text: &str, from: Format, to: Format) -> ConversionOutcome {
        self.convert_inner(text, from, to, None)
    }

    /// Like [`convert`](Self::convert), checking the token at parser yield
    /// points.
    pub fn convert_with_cancellation(
        &self,
        text: &str,
        from: Format,
        to: Format,
        token: &CancellationToken,
    ) -> ConversionOutcome {
        self.convert_inner(text, from, to, Some(token))
    }

    fn convert_inner(
        &self,
        text: &str,
        from: Format,
        to: Format,
        token: Option<&CancellationToken>,
    ) -> ConversionOutcome {
        let parsed = match token {
            Some(token) => parser::parse_with_cancellation(text, from, &self.config, token),
            None => parser::parse(text, from, &self.config),
        };
        let mut diagnostics = parsed.diagnostics;

        let value = match parsed.value {
            Some(value) => value,
            None => {
                return ConversionOutcome {
                    output: None,
                    diagnostics,
                    status: parsed.status,
                }
            }
        };

        if self.config.validate {
            diagnostics.extend(validation::validate(&value, &self.config.rules).diagnostics);
            if has_error(&diagnostics) {
                return ConversionOutcome {
                    output: None,
                    diagnostics,
                    status: Status::Failed,
                };
            }
        }

        let serialized = serializer::serialize(&value, to, &self.config);
        diagnostics.extend(serialized.diagnostics);
        match serialized.text {
            Some(output) => ConversionOutcome {
                output: Some(output),
                diagnostics,
                status: Status::Success,
            },
            None => ConversionOutcome {
                output: None,
                diagnostics,
                status: Status::Failed,
            },
        }
    }
}

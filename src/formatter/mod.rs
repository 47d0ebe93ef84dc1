//! In-place reformatting
//!
//! Formatting is conversion with the source format as the target: parse,
//! then re-serialize under the configured style. Because parsing
//! normalizes whitespace and serialization is deterministic, formatting
//! the same text twice produces identical output.

use crate::conversion::cancel::CancellationToken;
use crate::conversion::config::EngineConfig;
use crate::error::{ConversionOutcome, Status};
use crate::parser::{self, Format};
use crate::serializer;

/// Reformat `text` under the configured style for its own format.
pub fn format_text(text: &str, format: Format, config: &EngineConfig) -> ConversionOutcome {
    format_inner(text, format, config, None)
}

/// Like [`format_text`], with cooperative cancellation.
pub fn format_text_with_cancellation(
    text: &str,
    format: Format,
    config: &EngineConfig,
    token: &CancellationToken,
) -> ConversionOutcome {
    format_inner(text, format, config, Some(token))
}

fn format_inner(
    text: &str,
    format: Format,
    config: &EngineConfig,
    token: Option<&CancellationToken>,
) -> ConversionOutcome {
    let parsed = match token {
        Some(token) => parser::parse_with_cancellation(text, format, config, token),
        None => parser::parse(text, format, config),
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

    let serialized = serializer::serialize(&value, format, config);
    diagnostics.extend(serialized.diagnostics);
    let status = if serialized.text.is_some() {
        Status::Success
    } else {
        Status::Failed
    };
    ConversionOutcome {
        output: serialized.text,
        diagnostics,
        status,
    }
}

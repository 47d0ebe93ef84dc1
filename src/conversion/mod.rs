//! Conversion orchestration
//!
//! The engine wires the pipeline together: parse into the canonical
//! value, optionally validate, then serialize to the target format.
//! Diagnostics from every stage accumulate into one report, and output
//! is withheld whenever any stage produced an error.

pub mod cancel;
pub mod config;
pub mod engine;

pub use cancel::CancellationToken;
pub use config::{
    CsvStyle, EngineConfig, JsonIndent, JsonStyle, QuoteStyle, ValidationRules, YamlStyle,
};
pub use engine::ConversionEngine;

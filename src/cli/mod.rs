//! Command-line front end
//!
//! Thin layer over the library: resolve formats, read input, run the
//! engine, print diagnostics to stderr and output to stdout or a file.
//! Exit code 0 means output was produced (warnings allowed), 1 means it
//! was withheld, 2 is clap's own usage-error code.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use crate::conversion::config::{CsvStyle, EngineConfig, JsonIndent, JsonStyle};
use crate::error::Diagnostic;
use crate::parser::Format;
use crate::{convert_with_config, format_text_with_config, validate_text_with_config};

/// Convert structured data between JSON, YAML and CSV
#[derive(Parser, Debug)]
#[command(name = "structconv")]
#[command(about = "Convert and validate structured data (JSON, YAML, CSV)")]
#[command(version)]
pub struct CliArgs {
    /// Input file (default: stdin)
    #[arg()]
    pub input: Option<PathBuf>,

    /// Input format (inferred from the file extension if omitted)
    #[arg(short, long)]
    pub from: Option<Format>,

    /// Output format (default: same as input, i.e. reformat)
    #[arg(short, long)]
    pub to: Option<Format>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minify JSON output
    #[arg(long)]
    pub minify: bool,

    /// Spaces per JSON indentation level (0-16, default: 2)
    #[arg(long)]
    pub indent: Option<u8>,

    /// Sort object keys in JSON output
    #[arg(long)]
    pub sort_keys: bool,

    /// CSV field delimiter (default: ',')
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Treat CSV input as headerless; rows become arrays
    #[arg(long)]
    pub no_header: bool,

    /// Validate only; print diagnostics and produce no output
    #[arg(long)]
    pub check: bool,

    /// Print diagnostics as a JSON array on stderr
    #[arg(long)]
    pub json_diagnostics: bool,
}

/// Run the CLI. Returns the process exit code.
pub fn run(args: &CliArgs) -> Result<i32> {
    let text = read_input(args)?;
    let from = resolve_input_format(args)?;
    let to = args.to.unwrap_or(from);
    let config = build_config(args);

    if args.check {
        let outcome = validate_text_with_config(&text, from, &config);
        report_diagnostics(&outcome.diagnostics, args.json_diagnostics)?;
        return Ok(if outcome.is_valid() { 0 } else { 1 });
    }

    let outcome = if from == to {
        format_text_with_config(&text, from, &config)
    } else {
        convert_with_config(&text, from, to, &config)
    };
    report_diagnostics(&outcome.diagnostics, args.json_diagnostics)?;

    match outcome.output {
        Some(output) => {
            write_output(args, &output)?;
            Ok(0)
        }
        None => Ok(1),
    }
}

fn read_input(args: &CliArgs) -> Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        None => {
            if atty::is(atty::Stream::Stdin) {
                return Err(anyhow!(
                    "no input file given and stdin is a terminal; pass a path or pipe data in"
                ));
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read stdin")?;
            Ok(buffer)
        }
    }
}

fn resolve_input_format(args: &CliArgs) -> Result<Format> {
    if let Some(format) = args.from {
        return Ok(format);
    }
    let path = args.input.as_deref().ok_or_else(|| {
        anyhow!("--from is required when reading from stdin")
    })?;
    infer_format(path)
        .ok_or_else(|| anyhow!("cannot infer format of {}; pass --from", path.display()))
}

fn infer_format(path: &Path) -> Option<Format> {
    Format::from_extension(path.extension()?.to_str()?)
}

fn build_config(args: &CliArgs) -> EngineConfig {
    let mut json = JsonStyle::default();
    if args.minify {
        json.indent = JsonIndent::Minify;
        json.trailing_newline = false;
    } else if let Some(width) = args.indent {
        json.indent = JsonIndent::Spaces(width);
    }
    json.sort_keys = args.sort_keys;

    let mut csv = CsvStyle::default();
    if let Some(delimiter) = args.delimiter {
        csv.delimiter = delimiter;
    }
    csv.has_header_row = !args.no_header;

    EngineConfig::default().with_json(json).with_csv(csv)
}

fn report_diagnostics(diagnostics: &[Diagnostic], as_json: bool) -> Result<()> {
    if as_json {
        let rendered =
            serde_json::to_string_pretty(diagnostics).context("cannot encode diagnostics")?;
        eprintln!("{}", rendered);
    } else {
        for diagnostic in diagnostics {
            eprintln!("{}", diagnostic.display_line());
        }
    }
    Ok(())
}

fn write_output(args: &CliArgs, output: &str) -> Result<()> {
    match &args.output {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("cannot write {}", path.display())),
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}

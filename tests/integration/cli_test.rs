//! CLI tests driving the compiled binary.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_structconv"))
}

fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = binary()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary spawns");
    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(input.as_bytes())
        .expect("stdin accepts input");
    child.wait_with_output().expect("binary exits")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_convert_stdin_json_to_yaml() {
    let output = run_with_stdin(&["--from", "json", "--to", "yaml"], "{\"a\": 1}");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "a: 1\n");
}

#[test]
fn test_format_inferred_from_extension() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{\"x\": [1, 2]}").expect("write input");

    let output = binary()
        .arg(&path)
        .args(["--to", "yaml"])
        .output()
        .expect("binary runs");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "x:\n  - 1\n  - 2\n");
}

#[test]
fn test_reformat_when_no_target_given() {
    let output = run_with_stdin(&["--from", "json"], "{\"a\":1}");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\n  \"a\": 1\n}\n");
}

#[test]
fn test_minify_flag() {
    let output = run_with_stdin(&["--from", "json", "--minify"], "{\n  \"a\": 1\n}\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\"a\":1}");
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().expect("temp dir");
    let out_path = dir.path().join("out.yaml");

    let output = run_with_stdin(
        &[
            "--from",
            "json",
            "--to",
            "yaml",
            "--output",
            out_path.to_str().expect("utf-8 path"),
        ],
        "{\"a\": 1}",
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert_eq!(
        std::fs::read_to_string(&out_path).expect("output written"),
        "a: 1\n"
    );
}

#[test]
fn test_syntax_error_exits_one_with_diagnostic() {
    let output = run_with_stdin(&["--from", "json", "--to", "yaml"], "{\"a\": }");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let err = stderr(&output);
    assert!(err.contains("error:"), "{}", err);
    assert!(err.contains("line 1"), "{}", err);
}

#[test]
fn test_warnings_on_stderr_output_on_stdout() {
    let output = run_with_stdin(&["--from", "csv", "--to", "json"], "a,b\n1\n");
    assert!(output.status.success());
    assert!(!stdout(&output).is_empty());
    assert!(stderr(&output).contains("warning:"));
}

#[test]
fn test_check_mode() {
    let ok = run_with_stdin(&["--from", "yaml", "--check"], "a: 1\n");
    assert!(ok.status.success());
    assert_eq!(stdout(&ok), "");

    let bad = run_with_stdin(&["--from", "yaml", "--check"], "a: [1\n");
    assert_eq!(bad.status.code(), Some(1));
}

#[test]
fn test_json_diagnostics() {
    let output = run_with_stdin(
        &["--from", "json", "--to", "yaml", "--json-diagnostics"],
        "{\"k\": 1, \"k\": }",
    );
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value =
        serde_json::from_str(&stderr(&output)).expect("stderr is a JSON report");
    let entries = report.as_array().expect("array of diagnostics");
    assert!(!entries.is_empty());
    assert!(entries
        .iter()
        .any(|d| d["severity"] == "error" && d["kind"] == "syntax"));
}

#[test]
fn test_csv_dialect_flags() {
    let output = run_with_stdin(
        &["--from", "csv", "--to", "json", "--delimiter", ";", "--no-header", "--minify"],
        "1;x\n2;y\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "[[1,\"x\"],[2,\"y\"]]");
}

#[test]
fn test_stdin_without_from_is_usage_error() {
    let output = run_with_stdin(&["--to", "yaml"], "{}");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--from"));
}

#[test]
fn test_missing_file_fails() {
    let output = binary()
        .arg("/nonexistent/input.json")
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
}

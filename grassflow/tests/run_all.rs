//! Process-level tests for the `run-all` binary.

#![cfg(unix)]

use grassflow::config::{INTERPRETER_ENV, WORKDIR_ENV};
use grassflow::stages::grassland_workflow;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Writes every catalog script as a shell script; `failing` maps stage names to exit codes.
fn write_workflow_scripts(dir: &Path, failing: &[(&str, i32)]) {
    for stage in grassland_workflow().stages() {
        let path = dir.join(stage.script());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let code = failing
            .iter()
            .find(|(name, _)| *name == stage.name())
            .map_or(0, |(_, code)| *code);
        fs::write(&path, format!("exit {code}\n")).unwrap();
    }
}

fn run_all(interpreter: &str, workdir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_run-all"))
        .env(INTERPRETER_ENV, interpreter)
        .env(WORKDIR_ENV, workdir)
        .env_remove("RUST_LOG")
        .env_remove("GRASSFLOW_LOG_FORMAT")
        .output()
        .unwrap()
}

fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes).lines().map(str::to_string).collect()
}

fn failure_lines_naming(output: &Output, stage: &str) -> usize {
    lines(&output.stdout)
        .into_iter()
        .chain(lines(&output.stderr))
        .filter(|l| l.contains(stage) && l.to_lowercase().contains("fail"))
        .count()
}

#[test]
fn test_failing_stages_still_exit_successfully() {
    let dir = tempfile::tempdir().unwrap();
    write_workflow_scripts(dir.path(), &[("train-rf-xgb", 1), ("shap-plot", 2)]);

    let output = run_all("sh", dir.path());

    assert!(output.status.success(), "status: {:?}", output.status);
    let stdout = lines(&output.stdout);
    assert_eq!(
        stdout.first().map(String::as_str),
        Some("=== Global Mountain Grassland Analysis Workflow ===")
    );
    assert_eq!(
        stdout.last().map(String::as_str),
        Some("=== All steps completed successfully ===")
    );
    assert!(stdout.contains(&"Failed to run train-rf-xgb: exit status 1".to_string()));
    assert!(stdout.contains(&"Failed to run shap-plot: exit status 2".to_string()));
}

#[test]
fn test_each_failure_is_reported_once_across_stdout_and_stderr() {
    let dir = tempfile::tempdir().unwrap();
    write_workflow_scripts(dir.path(), &[("train-rf-xgb", 1), ("shap-plot", 2)]);

    let output = run_all("sh", dir.path());

    assert_eq!(failure_lines_naming(&output, "train-rf-xgb"), 1);
    assert_eq!(failure_lines_naming(&output, "shap-plot"), 1);
    assert_eq!(failure_lines_naming(&output, "lstm-model"), 0);
}

#[test]
fn test_every_stage_is_announced_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_workflow_scripts(dir.path(), &[]);

    let output = run_all("sh", dir.path());

    let announced: Vec<String> = lines(&output.stdout)
        .into_iter()
        .filter(|l| l.starts_with("--- Running: "))
        .collect();
    let expected: Vec<String> = grassland_workflow()
        .stages()
        .map(|s| format!("--- Running: {} ({}) ---", s.name(), s.script().display()))
        .collect();
    assert_eq!(announced, expected);
    assert_eq!(
        lines(&output.stdout)
            .iter()
            .filter(|l| l.starts_with(">> NOTE: gee_ndvi_climate_extraction.js"))
            .count(),
        1
    );
}

#[test]
fn test_missing_working_dir_reports_every_stage_and_completes() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not-created");

    let output = run_all("sh", &missing);

    assert!(output.status.success(), "status: {:?}", output.status);
    let stdout = lines(&output.stdout);
    let unexpected = stdout
        .iter()
        .filter(|l| l.starts_with("Unexpected error running "))
        .count();
    assert_eq!(unexpected, grassland_workflow().stage_count());
    assert_eq!(
        stdout.last().map(String::as_str),
        Some("=== All steps completed successfully ===")
    );
}

#[test]
fn test_blank_interpreter_is_the_only_fatal_configuration() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_all("   ", dir.path());

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("interpreter cannot be empty"));
}

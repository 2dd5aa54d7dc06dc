//! Process-level tests: the `cpext` binary and the fatal exit path
//!
//! Exit tests re-run this test binary filtered to a single test, with
//! `EXIT_CHILD_MODE` set. In that mode the test body calls the exit path
//! instead of asserting, and the parent inspects the child's status and
//! output streams.

#![cfg(feature = "cli")]

mod common;

use rand::Rng;
use rust_structured_logger::prelude::*;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CHILD_MODE: &str = "EXIT_CHILD_MODE";
const CHILD_CODE: &str = "EXIT_CHILD_CODE";

fn cpext(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let path = env!("CARGO_BIN_EXE_cpext");
    let mut command = Command::new(path);
    for var in [
        "CPEXT_LOG_LEVEL",
        "CPEXT_LOG_FILE",
        "CPEXT_JSON_LOG_LEVEL",
        "CPEXT_JSON_LOG_FILE",
    ] {
        command.env_remove(var);
    }
    command
        .args(args)
        .envs(envs.iter().copied())
        .output()
        .unwrap_or_else(|error| panic!("failed to run {}: {}", path, error))
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(String::from)
        .collect()
}

/// Re-run `test` in a child process; returns its output
fn run_child(test: &str, mode: &str, code: i32) -> Output {
    let exe = std::env::current_exe().expect("current test executable");
    Command::new(exe)
        .args([test, "--exact", "--test-threads=1", "--quiet"])
        .env(CHILD_MODE, mode)
        .env(CHILD_CODE, code.to_string())
        .output()
        .expect("failed to run child test process")
}

fn child_code() -> i32 {
    std::env::var(CHILD_CODE)
        .ok()
        .and_then(|code| code.parse().ok())
        .expect("child exit code")
}

/// Portable exit status range
fn random_code() -> i32 {
    rand::thread_rng().gen_range(0..=125)
}

#[test]
fn test_exit_with_logger() {
    if std::env::var(CHILD_MODE).as_deref() == Ok("logger") {
        let config = Config::default()
            .with_human_writer(SharedWriter::stdout())
            .with_human_fields(HumanFields {
                omit_time: true,
                omit_pid: true,
                ..HumanFields::default()
            })
            .with_exit_level(Level::ERROR)
            .with_exit_writer(SharedWriter::stderr());
        let (logger, _closer) = config.setup_logger().expect("logger setup");
        rust_structured_logger::exit!(logger, child_code(), "oops!");
    }

    let code = random_code();
    let output = run_child("test_exit_with_logger", "logger", code);
    assert_eq!(output.status.code(), Some(code));

    let prefix = format!("cli_exit::test_exit_with_logger:{}:", file!());
    let stdout = lines(&output.stdout);
    assert!(
        stdout
            .iter()
            .any(|line| line.starts_with(&prefix) && line.ends_with(":ERROR oops!")),
        "no exit record in stdout: {:?}",
        stdout
    );
    assert!(
        lines(&output.stderr).iter().any(|line| line == "oops!"),
        "no exit message in stderr: {:?}",
        output.stderr
    );
}

#[test]
fn test_exit_without_logger() {
    if std::env::var(CHILD_MODE).as_deref() == Ok("none") {
        rust_structured_logger::exitf(None, child_code(), format_args!("really bad: {}", 7));
    }

    let code = random_code();
    let output = run_child("test_exit_without_logger", "none", code);
    assert_eq!(output.status.code(), Some(code));
    assert!(lines(&output.stderr).iter().any(|line| line == "really bad: 7"));
    assert!(!lines(&output.stdout).iter().any(|line| line.contains("really bad")));
}

#[test]
fn test_exit_below_threshold_still_writes_message() {
    if std::env::var(CHILD_MODE).as_deref() == Ok("quiet") {
        let handler = HumanHandler::new(SharedWriter::stdout()).with_level(Level::ERROR);
        let logger = Logger::new(handler).with_exit_level(Level::DEBUG);
        logger.exit(child_code(), "quiet failure", &[]);
    }

    let code = random_code();
    let output = run_child("test_exit_below_threshold_still_writes_message", "quiet", code);
    assert_eq!(output.status.code(), Some(code));
    assert!(!lines(&output.stdout).iter().any(|line| line.contains("quiet failure")));
    assert!(lines(&output.stderr).iter().any(|line| line == "quiet failure"));
}

#[test]
fn test_cpext_wrong_argument_count() {
    let output = cpext(&["only-one"], &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert_eq!(
        lines(&output.stderr),
        vec!["cpext expects two args (1 given): source and destination"]
    );
}

#[test]
fn test_cpext_copies_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let src = dir.path().join("src.txt");
    let dst = dir.path().join("dst.txt");
    fs::write(&src, "payload\n").expect("Failed to write source");

    let output = cpext(&[path_str(&src).as_str(), path_str(&dst).as_str()], &[]);

    assert!(output.status.success(), "stderr: {:?}", lines(&output.stderr));
    assert!(output.stderr.is_empty());
    assert_eq!(fs::read_to_string(&dst).expect("Failed to read destination"), "payload\n");
}

#[test]
fn test_cpext_missing_source() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let src = dir.path().join("missing.txt");
    let dst = dir.path().join("dst.txt");

    let output = cpext(&[path_str(&src).as_str(), path_str(&dst).as_str()], &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = lines(&output.stderr);
    assert_eq!(stderr.len(), 1, "stderr: {:?}", stderr);
    assert!(stderr[0].starts_with("unable to open source: "));
    assert!(!dst.exists());
}

#[test]
fn test_cpext_missing_destination_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let src = dir.path().join("src.txt");
    let dst = dir.path().join("no-such-dir").join("dst.txt");
    fs::write(&src, "payload").expect("Failed to write source");

    let output = cpext(&[path_str(&src).as_str(), path_str(&dst).as_str()], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(lines(&output.stderr)[0].starts_with("unable to create destination: "));
}

#[test]
fn test_cpext_debug_logging_to_stdout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let src = dir.path().join("src.txt");
    let dst = dir.path().join("dst.txt");
    fs::write(&src, "payload").expect("Failed to write source");

    let output = cpext(
        &[
            "--log-level",
            "debug",
            "--log-file",
            "-",
            path_str(&src).as_str(),
            path_str(&dst).as_str(),
        ],
        &[],
    );

    assert!(output.status.success());
    let stdout = lines(&output.stdout);
    assert_eq!(stdout.len(), 3, "stdout: {:?}", stdout);
    assert!(stdout[0].contains(":cpext::main:"));
    assert!(stdout[0].ends_with(":DEBUG hello"));
    assert!(stdout[1].ends_with(&format!(
        ":INFO {} -> {}",
        src.display(),
        dst.display()
    )));
    assert!(stdout[2].ends_with(":DEBUG copied 7 bytes"));
}

#[test]
fn test_cpext_json_log_from_environment() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let log = dir.path().join("cpext.json");
    let log_path = log.to_string_lossy().into_owned();

    let output = cpext(
        &["a", "b", "c"],
        &[("CPEXT_JSON_LOG_FILE", &log_path), ("CPEXT_JSON_LOG_LEVEL", "TRACE")],
    );
    assert_eq!(output.status.code(), Some(2));

    let content = fs::read_to_string(&log).expect("Failed to read JSON log");
    let records = common::parse_json_lines(&content);
    assert_eq!(records.len(), 2, "records: {:?}", records);
    assert_eq!(records[0]["msg"], "hello");
    assert_eq!(records[0]["level"], "DEBUG");
    assert_eq!(records[0]["caller"]["name"], "cpext::main");
    assert_eq!(records[1]["level"], "DEBUG");
    assert_eq!(
        records[1]["msg"],
        "cpext expects two args (3 given): source and destination"
    );
}

#[test]
fn test_cpext_invalid_level() {
    let output = cpext(&["a", "b"], &[("CPEXT_LOG_LEVEL", "LOUD")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(lines(&output.stderr)[0].contains("Invalid log level: 'LOUD'"));
}

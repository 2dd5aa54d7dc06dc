//! Pinned human-readable line format, end to end through the logger

mod common;

use common::{caller_and_level, level_only, memory_logger};
use rust_structured_logger::prelude::*;
use rust_structured_logger::{function_name, info, trace, warn};

#[test]
fn test_macro_line_with_caller() {
    let (logger, memory) = memory_logger(Level::INFO, caller_and_level());

    let line = line!() + 1;
    info!(logger, "foo"; "a" => 8);

    let expected = format!(
        "{}:{}:{}:INFO foo (a: 8)",
        function_name!(),
        file!(),
        line
    );
    assert_eq!(memory.lines(), vec![expected]);
    assert_eq!(function_name!(), "human_output::test_macro_line_with_caller");
}

#[test]
fn test_macro_line_without_level() {
    let (logger, memory) = memory_logger(
        Level::INFO,
        HumanFields {
            omit_level: true,
            ..caller_and_level()
        },
    );

    let line = line!() + 1;
    info!(logger, "foo"; "a" => 8);

    assert_eq!(
        memory.lines(),
        vec![format!("{}:{}:{} foo (a: 8)", function_name!(), file!(), line)]
    );
}

#[test]
fn test_method_line_has_no_function_name() {
    let (logger, memory) = memory_logger(Level::INFO, caller_and_level());

    let line = line!() + 1;
    logger.warn("careful", &[Attr::new("retries", 3)]);

    assert_eq!(
        memory.lines(),
        vec![format!("{}:{}:WARN careful (retries: 3)", file!(), line)]
    );
}

#[test]
fn test_pid_field_follows_time() {
    let (logger, memory) = memory_logger(
        Level::INFO,
        HumanFields {
            omit_pid: false,
            ..level_only()
        },
    );

    logger.info("with pid", &[]);

    assert_eq!(
        memory.lines(),
        vec![format!("{}:INFO with pid", std::process::id())]
    );
}

#[test]
fn test_every_field_present() {
    let (logger, memory) = memory_logger(Level::INFO, HumanFields::default());

    logger.info("full", &[]);

    let lines = memory.lines();
    assert_eq!(lines.len(), 1);
    let (fields, message) = lines[0].split_once(' ').expect("field block");
    assert_eq!(message, "full");

    let parts: Vec<&str> = fields.split(':').collect();
    assert_eq!(parts.len(), 5, "time:pid:file:line:level, got {:?}", parts);
    assert_eq!(parts[0].len(), "20250108T103045Z".len());
    assert!(parts[0].ends_with('Z'));
    assert_eq!(parts[1], std::process::id().to_string());
    assert_eq!(parts[2], file!());
    assert!(parts[3].parse::<u32>().is_ok());
    assert_eq!(parts[4], "INFO");
}

#[test]
fn test_no_fields_no_separator() {
    let (logger, memory) = memory_logger(
        Level::INFO,
        HumanFields {
            omit_level: true,
            ..level_only()
        },
    );

    logger.info("bare", &[]);
    assert_eq!(memory.lines(), vec!["bare"]);
}

#[test]
fn test_trace_renders_as_trace() {
    let (logger, memory) = memory_logger(Level::TRACE, level_only());

    trace!(logger, "deep {}", 1);
    logger.log(Level::new(-7), "between", &[]);

    assert_eq!(memory.lines(), vec!["TRACE deep 1", "DEBUG-3 between"]);
}

#[test]
fn test_group_rendering() {
    let (logger, memory) = memory_logger(Level::INFO, level_only());

    logger.with_group("c").info("m", &[Attr::new("key", "value")]);
    logger
        .with_group("c")
        .with_group("d")
        .info("m", &[Attr::new("key", "value")]);
    logger.info(
        "m",
        &[Attr::group(
            "req",
            vec![Attr::new("method", "GET"), Attr::group("empty", Vec::new())],
        )],
    );

    assert_eq!(
        memory.lines(),
        vec![
            "INFO m (c: (key: value))",
            "INFO m (c: (d: (key: value)))",
            "INFO m (req: (method: GET) (empty))",
        ]
    );
}

#[test]
fn test_synthetic_attributes_never_parenthesized() {
    let (logger, memory) = memory_logger(Level::INFO, HumanFields::default());

    logger.with_group("g").info("m", &[Attr::new("x", 1)]);
    warn!(logger, "n"; "y" => 2);

    for line in memory.lines() {
        assert!(!line.contains("(pid"), "pid leaked: {}", line);
        assert!(!line.contains("(caller"), "caller leaked: {}", line);
    }
}

#[test]
fn test_sibling_loggers_are_isolated() {
    let (root, memory) = memory_logger(Level::INFO, level_only());

    let base = root.with(&[Attr::new("svc", "api")]);
    let left = base.with_group("left").with(&[Attr::new("l", 1)]);
    let right = base.with(&[Attr::new("r", 2)]);

    left.info("L", &[]);
    right.info("R", &[]);
    base.info("B", &[]);

    assert_eq!(
        memory.lines(),
        vec![
            "INFO L (svc: api) (left: (l: 1))",
            "INFO R (svc: api) (r: 2)",
            "INFO B (svc: api)",
        ]
    );
}

#[test]
fn test_scalar_values() {
    let (logger, memory) = memory_logger(Level::INFO, level_only());

    logger.info(
        "values",
        &[
            Attr::new("s", "text with spaces"),
            Attr::new("i", -3),
            Attr::new("u", 7u64),
            Attr::new("f", 1.5),
            Attr::new("b", true),
            Attr::new("d", std::time::Duration::from_millis(1500)),
            Attr::new("any", Value::any(std::net::Ipv4Addr::LOCALHOST)),
        ],
    );

    assert_eq!(
        memory.lines(),
        vec![
            "INFO values (s: text with spaces) (i: -3) (u: 7) (f: 1.5) (b: true) (d: 1.5s) (any: 127.0.0.1)"
        ]
    );
}

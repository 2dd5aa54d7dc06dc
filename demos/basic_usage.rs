//! Basic logger usage example
//!
//! Demonstrates the human-readable handler, the levels including Trace,
//! attributes, groups and derived loggers.
//!
//! Run with: cargo run --example basic_usage

use rust_structured_logger::prelude::*;
use rust_structured_logger::{debug, info, trace, warn};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Basic Usage Example ===\n");

    let handler = HumanHandler::new(SharedWriter::stdout()).with_level(Level::TRACE);
    let logger = Logger::new(handler);

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message", &[]);
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[]);
    logger.warn("This is a warning message", &[]);
    logger.error("This is an error message", &[]);
    logger.log(Level::new(2), "A custom level between INFO and WARN", &[]);

    println!("\n2. Macros record the enclosing function:");
    trace!(logger, "Entering main");
    debug!(logger, "Counter value: {}", 10);
    info!(logger, "Request served"; "status" => 200, "elapsed" => Duration::from_millis(12));

    println!("\n3. Derived loggers and groups:");
    let request = logger.with(&[Attr::new("request_id", "req-42")]);
    let db = request.with_group("db");
    db.info("Query complete", &[Attr::new("rows", 3)]);
    request.info("Response sent", &[]);
    db.with(&[Attr::new("table", "users")])
        .warn("Slow query", &[Attr::new("elapsed", Duration::from_millis(950))]);

    println!("\n4. Nested group values:");
    warn!(logger, "Retrying"; "attempt" => 2, "backoff" => Duration::from_secs(1));
    logger.info(
        "Connected",
        &[Attr::group(
            "peer",
            vec![Attr::new("host", "db.internal"), Attr::new("port", 5432)],
        )],
    );

    println!("\n5. Threshold filtering:");
    let quiet = Logger::new(HumanHandler::new(SharedWriter::stdout()).with_level(Level::WARN));
    quiet.info("Info message (hidden)", &[]);
    quiet.warn("Warning message (visible)", &[]);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}

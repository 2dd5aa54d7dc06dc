//! File logging example
//!
//! Demonstrates setup from environment and flags, writing human-readable
//! lines to stderr and JSON lines to a file at the same time.
//!
//! Run with: cargo run --example file_logging
//!
//! Try `DEMO_LOG_LEVEL=trace` or `DEMO_JSON_LOG_FILE=-` to change the setup.

use rust_structured_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - File Logging Example ===\n");

    let defaults = EnvDefaults::default().with_default_json_level("DEBUG");
    let mut config = Config::prepare_with("DEMO_", &defaults);
    if config.json_file.as_deref() == Some("/dev/null") {
        config.json_file = Some("application.json".to_string());
    }

    let (logger, closer) = config.setup_logger()?;
    let ctx = Context::background().with_logger(logger);

    println!("1. Logging to stderr and application.json:");
    let log = ctx.logger();
    log.info("Application started", &[]);
    log.debug("Loading configuration...", &[]);
    log.warn("Using default settings for some options", &[]);

    println!("\n2. Attributes carried through the context:");
    let (db, ctx) = ctx.with_attrs(&[Attr::new("component", "database")]);
    db.info("Connecting to database...", &[Attr::new("host", "localhost")]);
    ctx.logger()
        .with_group("pool")
        .info("Connection established", &[Attr::new("size", 8)]);

    println!("\n3. A cancelled context stops logging:");
    let (job, cancel) = ctx.with_cancel();
    ctx.logger().info_ctx(&job, "Job running", &[]);
    cancel.cancel();
    ctx.logger().info_ctx(&job, "Job output (hidden)", &[]);

    closer.close()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check application.json for the JSON lines");
    Ok(())
}

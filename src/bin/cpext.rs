//! Copy a file, logging through the structured logger.
//!
//! ```text
//! cpext [--log-level LEVEL] [--log-file FILE] [--json-log-level LEVEL] [--json-log-file FILE] SRC DST
//! ```
//!
//! Logging defaults come from `CPEXT_LOG_LEVEL` (default `WARN`),
//! `CPEXT_LOG_FILE`, `CPEXT_JSON_LOG_LEVEL` and `CPEXT_JSON_LOG_FILE`.
//! Exits with 2 on a wrong argument count and 1 when the copy fails.

use clap::Parser;
use rust_structured_logger::config::{Config, EnvDefaults, LogArgs};
use rust_structured_logger::{debug, exit, info, Context, Logger};
use std::fs::File;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "CPEXT_";

#[derive(Parser, Debug)]
#[command(name = "cpext", version, about = "Copy SRC to DST")]
struct Cli {
    #[command(flatten)]
    log: LogArgs,

    /// Source and destination
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

fn main() {
    let defaults = EnvDefaults::default().with_default_human_level("WARN");
    let mut config = Config::prepare_with(ENV_PREFIX, &defaults);
    let cli = Cli::parse();
    config.apply_args(&cli.log);

    let (logger, _closer) = match config.setup_logger() {
        Ok(setup) => setup,
        Err(e) => rust_structured_logger::exitf(None, 1, format_args!("{}", e)),
    };
    debug!(logger, "hello");

    if cli.paths.len() != 2 {
        exit!(
            logger,
            2,
            "{} expects two args ({} given): source and destination",
            program_name(),
            cli.paths.len()
        );
    }

    let ctx = Context::background().with_logger(logger);
    copy(&ctx, &cli.paths[0], &cli.paths[1]);
}

fn copy(ctx: &Context, src: &Path, dst: &Path) {
    let logger = ctx.logger();
    info!(logger, "{} -> {}", src.display(), dst.display());

    let mut reader = match File::open(src) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            exit!(logger, 1, "unable to open source: {}", e)
        }
        Err(e) => exit!(logger, 1, "unexpected error while opening source: {}", e),
    };

    if let Err(e) = create(ctx, &logger, dst, &mut reader) {
        if e.kind() == ErrorKind::NotFound {
            exit!(logger, 1, "unable to create destination: {}", e);
        }
        exit!(logger, 1, "unexpected error while creating destination: {}", e);
    }
}

fn create(ctx: &Context, logger: &Logger, dst: &Path, reader: &mut File) -> io::Result<()> {
    let mut writer = File::create(dst)?;
    let copied = io::copy(reader, &mut writer)?;
    writer.sync_all()?;
    logger.debugf_ctx(ctx, format_args!("copied {} bytes", copied));
    Ok(())
}

fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cpext".to_string())
}

//! Logger setup from environment variables and command-line flags
//!
//! [`Config::prepare`] reads four variables under a prefix, e.g. with
//! prefix `APP_`:
//!
//! | variable             | default       |
//! |----------------------|---------------|
//! | `APP_LOG_LEVEL`      | `INFO`        |
//! | `APP_LOG_FILE`       | `/dev/stderr` |
//! | `APP_JSON_LOG_LEVEL` | `INFO`        |
//! | `APP_JSON_LOG_FILE`  | `/dev/null`   |
//!
//! [`LogArgs`] holds the matching `--log-level`, `--log-file`,
//! `--json-log-level` and `--json-log-file` flags, which take precedence
//! once applied with [`Config::apply_args`].
//!
//! File targets: `/dev/null` or an empty string disables the handler,
//! `/dev/stdout` or `-` selects stdout, `/dev/stderr` selects stderr, and
//! anything else is opened for appending (created with mode 0644 on unix).

use crate::core::{Context, Handler, Level, Logger, LoggerError, Result, TimeLayout};
use crate::handlers::{
    HumanFields, HumanHandler, JsonHandler, MultiHandler, NullHandler, SharedWriter,
};
use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Arc;

pub const DEFAULT_HUMAN_LEVEL: &str = "INFO";
pub const DEFAULT_HUMAN_FILE: &str = "/dev/stderr";
pub const DEFAULT_JSON_LEVEL: &str = "INFO";
pub const DEFAULT_JSON_FILE: &str = "/dev/null";

/// Values used by [`Config::prepare_with`] for unset environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDefaults {
    pub human_level: String,
    pub human_file: String,
    pub json_level: String,
    pub json_file: String,
}

impl Default for EnvDefaults {
    fn default() -> Self {
        Self {
            human_level: DEFAULT_HUMAN_LEVEL.to_string(),
            human_file: DEFAULT_HUMAN_FILE.to_string(),
            json_level: DEFAULT_JSON_LEVEL.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
        }
    }
}

impl EnvDefaults {
    #[must_use]
    pub fn with_default_human_level(mut self, level: impl Into<String>) -> Self {
        self.human_level = level.into();
        self
    }

    #[must_use]
    pub fn with_default_json_level(mut self, level: impl Into<String>) -> Self {
        self.json_level = level.into();
        self
    }
}

/// Command-line overrides, meant to be flattened into an application's
/// own `clap` parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct LogArgs {
    /// Set log level
    #[cfg_attr(feature = "cli", arg(long, value_name = "LEVEL"))]
    pub log_level: Option<String>,

    /// Log to file
    #[cfg_attr(feature = "cli", arg(long, value_name = "FILE"))]
    pub log_file: Option<String>,

    /// Set JSON log level
    #[cfg_attr(feature = "cli", arg(long, value_name = "LEVEL"))]
    pub json_log_level: Option<String>,

    /// Log JSON to file
    #[cfg_attr(feature = "cli", arg(long, value_name = "FILE"))]
    pub json_log_file: Option<String>,
}

/// Everything needed to build a [`Logger`].
///
/// A writer set directly takes precedence over the matching file target.
/// A non-empty level string takes precedence over the matching `Level`.
#[derive(Clone)]
pub struct Config {
    pub human_writer: Option<SharedWriter>,
    pub human_level: Level,
    pub human_level_spec: Option<String>,
    pub human_file: Option<String>,
    pub human_fields: HumanFields,
    pub human_time_layout: TimeLayout,

    pub json_writer: Option<SharedWriter>,
    pub json_level: Level,
    pub json_level_spec: Option<String>,
    pub json_file: Option<String>,

    pub exit_writer: Option<SharedWriter>,
    pub exit_level: Level,

    /// Extra handlers, placed before the human and JSON ones
    pub handlers: Vec<Arc<dyn Handler>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            human_writer: None,
            human_level: Level::INFO,
            human_level_spec: None,
            human_file: None,
            human_fields: HumanFields::default(),
            human_time_layout: TimeLayout::default(),
            json_writer: None,
            json_level: Level::INFO,
            json_level_spec: None,
            json_file: None,
            exit_writer: Some(SharedWriter::stderr()),
            exit_level: Level::ERROR,
            handlers: Vec::new(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("human_writer", &self.human_writer)
            .field("human_level", &self.human_level)
            .field("human_level_spec", &self.human_level_spec)
            .field("human_file", &self.human_file)
            .field("human_fields", &self.human_fields)
            .field("json_writer", &self.json_writer)
            .field("json_level", &self.json_level)
            .field("json_level_spec", &self.json_level_spec)
            .field("json_file", &self.json_file)
            .field("exit_writer", &self.exit_writer)
            .field("exit_level", &self.exit_level)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Config {
    /// Read `<prefix>LOG_LEVEL` and friends from the process environment
    pub fn prepare(prefix: &str) -> Self {
        Self::prepare_with(prefix, &EnvDefaults::default())
    }

    pub fn prepare_with(prefix: &str, defaults: &EnvDefaults) -> Self {
        Self::prepare_from(prefix, defaults, |key| std::env::var(key).ok())
    }

    /// Like [`Config::prepare_with`], resolving variables through `lookup`
    pub fn prepare_from<F>(prefix: &str, defaults: &EnvDefaults, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(&format!("{}{}", prefix, key)).unwrap_or_else(|| default.to_string())
        };

        Self {
            human_level_spec: Some(get("LOG_LEVEL", &defaults.human_level)),
            human_file: Some(get("LOG_FILE", &defaults.human_file)),
            json_level_spec: Some(get("JSON_LOG_LEVEL", &defaults.json_level)),
            json_file: Some(get("JSON_LOG_FILE", &defaults.json_file)),
            exit_level: Level::DEBUG,
            ..Self::default()
        }
    }

    /// Override levels and files with whatever flags were given
    pub fn apply_args(&mut self, args: &LogArgs) {
        if let Some(ref level) = args.log_level {
            self.human_level_spec = Some(level.clone());
        }
        if let Some(ref file) = args.log_file {
            self.human_file = Some(file.clone());
        }
        if let Some(ref level) = args.json_log_level {
            self.json_level_spec = Some(level.clone());
        }
        if let Some(ref file) = args.json_log_file {
            self.json_file = Some(file.clone());
        }
    }

    #[must_use]
    pub fn with_human_writer(mut self, writer: SharedWriter) -> Self {
        self.human_writer = Some(writer);
        self
    }

    #[must_use]
    pub fn with_human_fields(mut self, fields: HumanFields) -> Self {
        self.human_fields = fields;
        self
    }

    #[must_use]
    pub fn with_json_writer(mut self, writer: SharedWriter) -> Self {
        self.json_writer = Some(writer);
        self
    }

    #[must_use]
    pub fn with_exit_writer(mut self, writer: impl Into<Option<SharedWriter>>) -> Self {
        self.exit_writer = writer.into();
        self
    }

    #[must_use]
    pub fn with_exit_level(mut self, level: Level) -> Self {
        self.exit_level = level;
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Open the configured targets and build the logger.
    ///
    /// Files opened here are owned by the returned [`Closer`]. On error,
    /// anything already opened is closed again.
    pub fn setup_logger(&self) -> Result<(Logger, Closer)> {
        let mut closer = Closer::default();
        match self.build_handlers(&mut closer) {
            Ok(mut handlers) => {
                let handler: Arc<dyn Handler> = match handlers.len() {
                    0 => Arc::new(NullHandler),
                    1 => handlers.remove(0),
                    _ => Arc::new(MultiHandler::new(handlers)),
                };
                let logger = Logger::from_arc(handler)
                    .with_exit_writer(self.exit_writer.clone())
                    .with_exit_level(self.exit_level);
                Ok((logger, closer))
            }
            Err(e) => {
                let _ = closer.close();
                Err(e)
            }
        }
    }

    /// [`Config::setup_logger`], binding the logger into a context derived
    /// from `ctx`
    pub fn setup_context(&self, ctx: &Context) -> Result<(Context, Closer)> {
        let (logger, closer) = self.setup_logger()?;
        Ok((ctx.with_logger(logger), closer))
    }

    fn build_handlers(&self, closer: &mut Closer) -> Result<Vec<Arc<dyn Handler>>> {
        self.human_time_layout.validate()?;
        let mut handlers = self.handlers.clone();

        let human_writer = match self.human_writer {
            Some(ref writer) => Some(writer.clone()),
            None => open_target(self.human_file.as_deref(), closer)?,
        };
        if let Some(writer) = human_writer {
            let level = resolve_level(self.human_level, self.human_level_spec.as_deref())?;
            handlers.push(Arc::new(
                HumanHandler::new(writer)
                    .with_level(level)
                    .with_fields(self.human_fields)
                    .with_time_layout(self.human_time_layout.clone()),
            ));
        }

        let json_writer = match self.json_writer {
            Some(ref writer) => Some(writer.clone()),
            None => open_target(self.json_file.as_deref(), closer)?,
        };
        if let Some(writer) = json_writer {
            let level = resolve_level(self.json_level, self.json_level_spec.as_deref())?;
            handlers.push(Arc::new(JsonHandler::new(writer).with_level(level)));
        }

        Ok(handlers)
    }
}

fn resolve_level(level: Level, spec: Option<&str>) -> Result<Level> {
    match spec {
        Some(spec) if !spec.is_empty() => spec.parse(),
        _ => Ok(level),
    }
}

fn open_target(target: Option<&str>, closer: &mut Closer) -> Result<Option<SharedWriter>> {
    let Some(target) = target else {
        return Ok(None);
    };

    match target {
        "" | "/dev/null" => Ok(None),
        "-" | "/dev/stdout" => Ok(Some(SharedWriter::stdout())),
        "/dev/stderr" => Ok(Some(SharedWriter::stderr())),
        path => {
            let file = open_log_file(path)
                .map_err(|e| LoggerError::io_operation("opening log file", path, e))?;
            let file = ClosableFile(Arc::new(Mutex::new(Some(file))));
            closer.files.push(file.clone());
            Ok(Some(SharedWriter::named(path, file)))
        }
    }
}

fn open_log_file(path: &str) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

/// A log file shared between its handler's writer and the [`Closer`].
/// Once closed, writes fail.
#[derive(Debug, Clone)]
struct ClosableFile(Arc<Mutex<Option<File>>>);

impl ClosableFile {
    fn take(&self) -> Option<File> {
        self.0.lock().take()
    }
}

fn closed_file_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "log file closed")
}

impl Write for ClosableFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock().as_mut() {
            Some(file) => file.write(buf),
            None => Err(closed_file_error()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.lock().as_mut() {
            Some(file) => file.flush(),
            None => Err(closed_file_error()),
        }
    }
}

/// Owns the files opened by [`Config::setup_logger`].
///
/// Call [`Closer::close`] to learn about failures. A closer dropped without
/// being closed still closes its files, reporting failures on stderr. Writes
/// through the logger after closing fail and are dropped.
#[derive(Debug, Default)]
pub struct Closer {
    files: Vec<ClosableFile>,
}

impl Closer {
    /// Number of files still open
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sync and close every file, reporting all failures together
    pub fn close(mut self) -> Result<()> {
        self.close_files()
    }

    fn close_files(&mut self) -> Result<()> {
        let mut errors = Vec::new();
        for file in self.files.drain(..).filter_map(|f| f.take()) {
            // Only regular files can be synced; devices and pipes reject it.
            let regular = file.metadata().map(|m| m.is_file()).unwrap_or(false);
            if regular {
                if let Err(e) = file.sync_all() {
                    errors.push(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::Close { errors })
        }
    }
}

impl Drop for Closer {
    fn drop(&mut self) {
        if let Err(e) = self.close_files() {
            eprintln!("[LOGGER ERROR] Failed to close log files: {}", e);
        }
    }
}

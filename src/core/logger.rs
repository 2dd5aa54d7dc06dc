//! Main logger implementation
//!
//! A [`Logger`] is a cheap, cloneable front for one [`Handler`]. Every call
//! shape funnels into [`Logger::log_record_at`], which gates on the handler's
//! threshold and the context, stamps the call site and process id onto a
//! fresh [`Record`], and hands it over. Handler errors never reach the
//! caller.
//!
//! Call sites are captured with `#[track_caller]`, so the reported file and
//! line are those of the code calling into the logger, not of this module.
//! The method call shapes only know file and line. The [`info!`] family of
//! macros also records the enclosing function name, giving the full
//! `name:file:line` caller field.
//!
//! [`info!`]: crate::info

use super::caller::Caller;
use super::context::Context;
use super::handler::Handler;
use super::level::Level;
use super::record::Record;
use super::value::Attr;
use crate::handlers::{NullHandler, SharedWriter};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Front end over one [`Handler`]
///
/// Use the [`log!`](crate::log) family of macros when the caller's function
/// name should appear in records; the methods report file and line only.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    exit_writer: Option<SharedWriter>,
    exit_level: Level,
}

/// Generates the four call shapes of one level
macro_rules! level_methods {
    ($level:expr, $name:literal, $plain:ident, $ctx:ident, $fmt:ident, $fmt_ctx:ident) => {
        #[doc = concat!("Log `message` with `attrs` at ", $name, " level")]
        #[track_caller]
        #[inline]
        pub fn $plain(&self, message: &str, attrs: &[Attr]) {
            self.log_record_at(None, Location::caller(), None, $level, format_args!("{}", message), attrs);
        }

        #[doc = concat!("Log at ", $name, " level unless `ctx` is done")]
        #[track_caller]
        #[inline]
        pub fn $ctx(&self, ctx: &Context, message: &str, attrs: &[Attr]) {
            self.log_record_at(Some(ctx), Location::caller(), None, $level, format_args!("{}", message), attrs);
        }

        #[track_caller]
        #[inline]
        pub fn $fmt(&self, args: fmt::Arguments<'_>) {
            self.log_record_at(None, Location::caller(), None, $level, args, &[]);
        }

        #[track_caller]
        #[inline]
        pub fn $fmt_ctx(&self, ctx: &Context, args: fmt::Arguments<'_>) {
            self.log_record_at(Some(ctx), Location::caller(), None, $level, args, &[]);
        }
    };
}

impl Logger {
    pub fn new(handler: impl Handler + 'static) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    /// Exit messages go to stderr and are logged at ERROR
    pub fn from_arc(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            exit_writer: Some(SharedWriter::stderr()),
            exit_level: Level::ERROR,
        }
    }

    /// Set where exit messages are written; `None` skips the write
    #[must_use]
    pub fn with_exit_writer(mut self, writer: impl Into<Option<SharedWriter>>) -> Self {
        self.exit_writer = writer.into();
        self
    }

    /// Set the level exit messages are logged at
    #[must_use]
    pub fn with_exit_level(mut self, level: Level) -> Self {
        self.exit_level = level;
        self
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn exit_level(&self) -> Level {
        self.exit_level
    }

    pub fn exit_writer(&self) -> Option<&SharedWriter> {
        self.exit_writer.as_ref()
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Derive a logger with `attrs` bound to every record it emits
    #[must_use]
    pub fn with(&self, attrs: &[Attr]) -> Self {
        Self {
            handler: self.handler.with_attrs(attrs),
            ..self.clone()
        }
    }

    /// Derive a logger whose attributes nest under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            ..self.clone()
        }
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: &str, attrs: &[Attr]) {
        self.log_record_at(None, Location::caller(), None, level, format_args!("{}", message), attrs);
    }

    #[track_caller]
    pub fn log_ctx(&self, ctx: &Context, level: Level, message: &str, attrs: &[Attr]) {
        self.log_record_at(Some(ctx), Location::caller(), None, level, format_args!("{}", message), attrs);
    }

    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log_record_at(None, Location::caller(), None, level, args, &[]);
    }

    #[track_caller]
    pub fn logf_ctx(&self, ctx: &Context, level: Level, args: fmt::Arguments<'_>) {
        self.log_record_at(Some(ctx), Location::caller(), None, level, args, &[]);
    }

    level_methods!(Level::TRACE, "TRACE", trace, trace_ctx, tracef, tracef_ctx);
    level_methods!(Level::DEBUG, "DEBUG", debug, debug_ctx, debugf, debugf_ctx);
    level_methods!(Level::INFO, "INFO", info, info_ctx, infof, infof_ctx);
    level_methods!(Level::WARN, "WARN", warn, warn_ctx, warnf, warnf_ctx);
    level_methods!(Level::ERROR, "ERROR", error, error_ctx, errorf, errorf_ctx);

    /// Shared path behind every call shape and the logging macros.
    ///
    /// `location` and `function` describe the call site. The message is only
    /// formatted once the record is known to be wanted.
    #[doc(hidden)]
    pub fn log_record_at(
        &self,
        ctx: Option<&Context>,
        location: &Location<'_>,
        function: Option<&str>,
        level: Level,
        args: fmt::Arguments<'_>,
        attrs: &[Attr],
    ) {
        if !self.handler.enabled(level) || ctx.is_some_and(Context::is_done) {
            return;
        }

        let mut caller = Caller::from_location(location);
        if let Some(name) = function {
            caller = caller.with_name(name);
        }

        let record = Record::new(level, args.to_string())
            .with_attrs(attrs.iter().cloned())
            .with_origin(&caller, std::process::id());

        let _ = self.handler.handle(&record);
    }

    /// Log `message` at the exit level, write it to the exit writer and
    /// terminate the process with `code`
    ///
    /// # Panics
    ///
    /// Panics if the exit writer fails.
    #[track_caller]
    pub fn exit(&self, code: i32, message: &str, attrs: &[Attr]) -> ! {
        self.exit_record_at(None, Location::caller(), None, code, format_args!("{}", message), attrs)
    }

    #[track_caller]
    pub fn exit_ctx(&self, ctx: &Context, code: i32, message: &str, attrs: &[Attr]) -> ! {
        self.exit_record_at(Some(ctx), Location::caller(), None, code, format_args!("{}", message), attrs)
    }

    #[track_caller]
    pub fn exitf(&self, code: i32, args: fmt::Arguments<'_>) -> ! {
        self.exit_record_at(None, Location::caller(), None, code, args, &[])
    }

    #[track_caller]
    pub fn exitf_ctx(&self, ctx: &Context, code: i32, args: fmt::Arguments<'_>) -> ! {
        self.exit_record_at(Some(ctx), Location::caller(), None, code, args, &[])
    }

    #[doc(hidden)]
    pub fn exit_record_at(
        &self,
        ctx: Option<&Context>,
        location: &Location<'_>,
        function: Option<&str>,
        code: i32,
        args: fmt::Arguments<'_>,
        attrs: &[Attr],
    ) -> ! {
        let message = args.to_string();
        self.report_exit(ctx, location, function, &message, attrs);
        std::process::exit(code)
    }

    /// Everything [`Logger::exit`] does short of terminating
    pub(crate) fn report_exit(
        &self,
        ctx: Option<&Context>,
        location: &Location<'_>,
        function: Option<&str>,
        message: &str,
        attrs: &[Attr],
    ) {
        self.log_record_at(
            ctx,
            location,
            function,
            self.exit_level,
            format_args!("{}", message),
            attrs,
        );
        if let Some(ref writer) = self.exit_writer {
            write_exit_message(writer, message);
        }
    }
}

impl Default for Logger {
    /// A logger over [`NullHandler`]
    fn default() -> Self {
        Self::new(NullHandler)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("exit_writer", &self.exit_writer)
            .field("exit_level", &self.exit_level)
            .finish_non_exhaustive()
    }
}

fn write_exit_message(writer: &SharedWriter, message: &str) {
    let line = format!("{}\n", message);
    if let Err(e) = writer.write_line(line.as_bytes()) {
        panic!("unable to write exit message: {}", e);
    }
}

/// Exit through `logger`, or straight to stderr when there is none
///
/// # Panics
///
/// Panics if the exit message cannot be written.
#[track_caller]
pub fn exit(logger: Option<&Logger>, code: i32, message: &str) -> ! {
    exitf(logger, code, format_args!("{}", message))
}

#[track_caller]
pub fn exitf(logger: Option<&Logger>, code: i32, args: fmt::Arguments<'_>) -> ! {
    match logger {
        Some(logger) => logger.exit_record_at(None, Location::caller(), None, code, args, &[]),
        None => {
            write_exit_message(&SharedWriter::stderr(), &args.to_string());
            std::process::exit(code)
        }
    }
}

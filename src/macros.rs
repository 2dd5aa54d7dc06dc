//! Logging macros.
//!
//! Unlike the [`Logger`](crate::Logger) methods, the macros also record the
//! name of the enclosing function in the `caller` group. Each one accepts two
//! shapes:
//!
//! - `info!(logger, "format {}", args...)`, formatted like `format!`
//! - `info!(logger, "message"; "key" => value, ...)`, with attributes
//!
//! # Examples
//!
//! ```
//! use rust_structured_logger::handlers::{HumanFields, HumanHandler, MemoryWriter};
//! use rust_structured_logger::{info, Logger};
//!
//! let memory = MemoryWriter::new();
//! let fields = HumanFields { omit_time: true, omit_pid: true, omit_caller: true, omit_level: false };
//! let logger = Logger::new(HumanHandler::new(memory.shared()).with_fields(fields));
//!
//! info!(logger, "Server listening on port {}", 8080);
//! info!(logger, "request served"; "status" => 200, "path" => "/health");
//!
//! assert_eq!(
//!     memory.lines(),
//!     vec![
//!         "INFO Server listening on port 8080",
//!         "INFO request served (status: 200) (path: /health)",
//!     ]
//! );
//! ```

/// Qualified name of the enclosing function, closures stripped.
///
/// ```
/// # fn main() {
/// let name = rust_structured_logger::function_name!();
/// assert!(name.ends_with("main"));
/// # }
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::trim_function_name(type_name_of(__f))
    }};
}

/// Log at an arbitrary level.
///
/// ```
/// # use rust_structured_logger::Logger;
/// # let logger = Logger::default();
/// use rust_structured_logger::{log, Level};
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::new(2), "Error code: {}", 500);
/// log!(logger, Level::WARN, "with attributes"; "attempt" => 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:expr => $value:expr),* $(,)?) => {
        $logger.log_record_at(
            ::std::option::Option::None,
            ::std::panic::Location::caller(),
            ::std::option::Option::Some($crate::function_name!()),
            $level,
            format_args!("{}", $msg),
            &[$($crate::core::Attr::new($key, $value)),*],
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_record_at(
            ::std::option::Option::None,
            ::std::panic::Location::caller(),
            ::std::option::Option::Some($crate::function_name!()),
            $level,
            format_args!($($arg)+),
            &[],
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::TRACE, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::ERROR, $($arg)+)
    };
}

/// Log at the logger's exit level, write the message to its exit writer and
/// terminate with `code`.
///
/// ```no_run
/// # use rust_structured_logger::Logger;
/// # let logger = Logger::default();
/// use rust_structured_logger::exit;
/// exit!(logger, 1, "unable to open source: {}", "missing.txt");
/// ```
#[macro_export]
macro_rules! exit {
    ($logger:expr, $code:expr, $msg:expr; $($key:expr => $value:expr),* $(,)?) => {
        $logger.exit_record_at(
            ::std::option::Option::None,
            ::std::panic::Location::caller(),
            ::std::option::Option::Some($crate::function_name!()),
            $code,
            format_args!("{}", $msg),
            &[$($crate::core::Attr::new($key, $value)),*],
        )
    };
    ($logger:expr, $code:expr, $($arg:tt)+) => {
        $logger.exit_record_at(
            ::std::option::Option::None,
            ::std::panic::Location::caller(),
            ::std::option::Option::Some($crate::function_name!()),
            $code,
            format_args!($($arg)+),
            &[],
        )
    };
}

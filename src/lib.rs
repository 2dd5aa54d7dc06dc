//! # Rust Structured Logger
//!
//! A structured logging facade: leveled events carrying key/value
//! attributes, nested attribute groups, and pluggable handlers.
//!
//! ## Features
//!
//! - **Structured attributes**: scalars, durations, timestamps and nested groups
//! - **Handlers**: a human-readable line format, JSON lines, fan-out, and no-op
//! - **Trace level** below Debug, rendered as `TRACE` everywhere
//! - **Call sites**: every record carries its caller and the process id
//! - **Fatal exit**: a final message guaranteed to reach the exit stream
//! - **Setup** from environment variables and command-line flags
//!
//! ## Example
//!
//! ```
//! use rust_structured_logger::prelude::*;
//!
//! let memory = MemoryWriter::new();
//! let fields = HumanFields { omit_time: true, omit_pid: true, omit_caller: true, omit_level: false };
//! let logger = Logger::new(HumanHandler::new(memory.shared()).with_fields(fields));
//!
//! let request = logger.with(&[Attr::new("request", 42)]).with_group("db");
//! request.info("query done", &[Attr::new("rows", 3)]);
//!
//! assert_eq!(memory.lines(), vec!["INFO query done (request: 42) (db: (rows: 3))"]);
//! ```

pub mod config;
pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::config::{Closer, Config, EnvDefaults, LogArgs};
    pub use crate::core::{
        Attr, CancelHandle, Caller, Context, Handler, Level, Logger, LoggerError, Record, Result,
        TimeLayout, Value,
    };
    pub use crate::handlers::{
        HumanFields, HumanHandler, JsonHandler, MemoryWriter, MultiHandler, NullHandler,
        SharedWriter,
    };
}

pub use crate::config::{Closer, Config, EnvDefaults, LogArgs};
pub use crate::core::{
    exit, exitf, Attr, CancelHandle, Caller, Context, Handler, Level, Logger, LoggerError, Record,
    Result, TimeLayout, Value,
};
pub use crate::handlers::{HumanFields, HumanHandler, JsonHandler, MultiHandler, NullHandler, SharedWriter};

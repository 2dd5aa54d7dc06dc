//! Core logger types and traits

pub mod caller;
pub mod context;
pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod timestamp;
pub mod value;

pub use caller::{trim_function_name, Caller, CALLER_KEY};
pub use context::{CancelHandle, Context};
pub use error::{LoggerError, Result};
pub use handler::Handler;
pub use level::Level;
pub use logger::{exit, exitf, Logger};
pub use record::{Record, PID_KEY};
pub use timestamp::{TimeLayout, COMPACT_RFC3339_LAYOUT};
pub use value::{Attr, Value};

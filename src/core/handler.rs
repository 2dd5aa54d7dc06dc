//! Handler trait for log output destinations

use super::{error::Result, level::Level, record::Record, value::Attr};
use std::sync::Arc;

/// A sink that renders or forwards records.
///
/// Handlers are immutable once shared: `with_attrs` and `with_group` return a
/// new handler and leave `self` untouched, so several loggers derived from
/// the same parent can be specialized concurrently.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be handled at all
    fn enabled(&self, level: Level) -> bool;

    fn handle(&self, record: &Record) -> Result<()>;

    /// Derive a handler with `attrs` bound at the current group level
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// Derive a handler where later attributes nest under `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

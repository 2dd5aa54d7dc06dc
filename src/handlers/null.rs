//! Handler that discards everything

use crate::core::{Attr, Handler, Level, Record, Result};
use std::sync::Arc;

/// Never enabled; `handle` is a no-op. The default handler of
/// [`Logger`](crate::core::Logger).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullHandler;

impl Handler for NullHandler {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn handle(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn with_attrs(&self, _attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(NullHandler)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn Handler> {
        Arc::new(NullHandler)
    }
}

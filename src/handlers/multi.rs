//! Fan-out handler
//!
//! Forwards each record to every member handler enabled at the record's
//! level. A failing member does not stop delivery to the others; the first
//! error is returned once all members have been tried.

use crate::core::{Attr, Handler, Level, Record, Result};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MultiHandler {
    handlers: Vec<Arc<dyn Handler>>,
}

impl MultiHandler {
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self { handlers }
    }

    /// Add a member handler
    #[must_use]
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for MultiHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiHandler")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Handler for MultiHandler {
    fn enabled(&self, level: Level) -> bool {
        self.handlers.iter().any(|h| h.enabled(level))
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut first_error = None;
        for handler in &self.handlers {
            if !handler.enabled(record.level) {
                continue;
            }
            if let Err(e) = handler.handle(record) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(Self::new(
            self.handlers.iter().map(|h| h.with_attrs(attrs)).collect(),
        ))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(Self::new(
            self.handlers.iter().map(|h| h.with_group(name)).collect(),
        ))
    }
}

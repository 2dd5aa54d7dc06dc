//! Shared output streams
//!
//! Handlers may be called from many threads at once. Each handler writes a
//! whole line under one lock acquisition, so lines from concurrent callers
//! never interleave. Nothing is buffered: every line is flushed before the
//! lock is released.

use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
    name: Arc<str>,
}

impl SharedWriter {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self::named("writer", writer)
    }

    /// Wrap `writer`, labelling it for error messages
    pub fn named(name: impl Into<Arc<str>>, writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
            name: name.into(),
        }
    }

    pub fn stdout() -> Self {
        Self::named("stdout", io::stdout())
    }

    pub fn stderr() -> Self {
        Self::named("stderr", io::stderr())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write `line` in full and flush it
    pub fn write_line(&self, line: &[u8]) -> Result<()> {
        let mut writer = self.inner.lock();
        writer
            .write_all(line)
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::io_operation("writing log line", self.name.to_string(), e))
    }
}

impl fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedWriter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// In-memory sink, handy for asserting on rendered output
///
/// # Example
///
/// ```
/// use rust_structured_logger::handlers::{MemoryWriter, SharedWriter};
///
/// let memory = MemoryWriter::new();
/// let writer = SharedWriter::new(memory.clone());
/// writer.write_line(b"hello\n").unwrap();
/// assert_eq!(memory.lines(), vec!["hello"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience wrapper returning a [`SharedWriter`] over this buffer
    pub fn shared(&self) -> SharedWriter {
        SharedWriter::named("memory", self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

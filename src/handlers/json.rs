//! JSON-lines handler for structured logging
//!
//! Writes each record as a single-line JSON object:
//!
//! ```text
//! {"time":"2025-01-08T10:30:45.123456789Z","level":"INFO","msg":"listening","port":8080,"caller":{...},"pid":4242}
//! ```
//!
//! Groups, whether passed as attribute values or opened with
//! [`Handler::with_group`], become nested objects. Unlike the human handler,
//! the synthetic `caller` and `pid` attributes are ordinary fields here.

use super::writer::SharedWriter;
use crate::core::{Attr, Handler, Level, Record, Result};
use chrono::SecondsFormat;
use serde_json::{Map, Value as Json};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct Frame {
    name: Option<String>,
    attrs: Vec<Attr>,
}

#[derive(Debug, Clone)]
pub struct JsonHandler {
    writer: SharedWriter,
    level: Level,
    /// Never empty: `frames[0]` is the unnamed root frame
    frames: Vec<Frame>,
}

impl JsonHandler {
    pub fn new(writer: SharedWriter) -> Self {
        Self {
            writer,
            level: Level::INFO,
            frames: vec![Frame::default()],
        }
    }

    /// Set the minimum level handled
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Build the JSON object for `record`
    pub fn to_json(&self, record: &Record) -> Map<String, Json> {
        let mut object = Map::new();
        object.insert(
            "time".to_string(),
            Json::String(record.time.to_rfc3339_opts(SecondsFormat::Nanos, true)),
        );
        // The level name substitutes TRACE for what the four-level scale
        // would print as DEBUG-4.
        object.insert("level".to_string(), Json::String(record.level.name().into_owned()));
        object.insert("msg".to_string(), Json::String(record.message.clone()));

        // Fold frames from the innermost outwards so each group object is
        // complete before it is attached to its parent.
        let innermost = self.frames.len() - 1;
        let mut nested: Option<(String, Map<String, Json>)> = None;
        for (idx, frame) in self.frames.iter().enumerate().rev() {
            let mut fields = Map::new();
            for attr in &frame.attrs {
                attr.insert_json(&mut fields);
            }
            if idx == innermost {
                for attr in &record.attrs {
                    attr.insert_json(&mut fields);
                }
            }
            if let Some((name, child)) = nested.take() {
                if !child.is_empty() {
                    fields.insert(name, Json::Object(child));
                }
            }

            match frame.name {
                Some(ref name) => nested = Some((name.clone(), fields)),
                None => object.extend(fields),
            }
        }

        object
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut line = serde_json::to_string(&Json::Object(self.to_json(record)))?;
        line.push('\n');
        self.writer.write_line(line.as_bytes())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        if let Some(frame) = derived.frames.last_mut() {
            frame.attrs.extend_from_slice(attrs);
        }
        Arc::new(derived)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.frames.push(Frame {
                name: Some(name.to_string()),
                attrs: Vec::new(),
            });
        }
        Arc::new(derived)
    }
}

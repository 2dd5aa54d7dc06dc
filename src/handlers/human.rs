//! Human-readable line handler
//!
//! Each record becomes exactly one line:
//!
//! ```text
//! 20250108T103045Z:4242:app::serve:src/server.rs:88:INFO listening (port: 8080)
//! ```
//!
//! The field block (timestamp, pid, caller name, caller file, caller line,
//! level) is joined with `:`, then one space, then the message verbatim,
//! then the attributes. Attributes bound through [`Handler::with_attrs`] are
//! rendered once, when bound, and kept per group frame; groups opened with
//! [`Handler::with_group`] wrap everything bound or logged after them in
//! `(name: ...)`.

use super::writer::SharedWriter;
use crate::core::{
    Attr, Handler, Level, Record, Result, TimeLayout, Value, CALLER_KEY, PID_KEY,
};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Fields of the line prefix that can be switched off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HumanFields {
    pub omit_time: bool,
    pub omit_pid: bool,
    pub omit_caller: bool,
    pub omit_level: bool,
}

/// One nesting level of bound attributes
#[derive(Debug, Clone, Default)]
struct Frame {
    /// `None` for the root frame
    name: Option<String>,
    attrs: Vec<String>,
}

/// Synthetic attributes pulled out of a record
#[derive(Default)]
struct Origin<'a> {
    pid: Option<i64>,
    name: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<i64>,
}

impl<'a> Origin<'a> {
    /// Split the record's attributes into the synthetic `pid`/`caller` ones
    /// and everything else
    fn extract(attrs: &'a [Attr]) -> (Self, Vec<&'a Attr>) {
        let mut origin = Origin::default();
        let mut rest = Vec::with_capacity(attrs.len());

        for attr in attrs {
            match (attr.key.as_str(), &attr.value) {
                (PID_KEY, Value::Int(pid)) => origin.pid = Some(*pid),
                (CALLER_KEY, Value::Group(members)) => {
                    for member in members {
                        match (member.key.as_str(), &member.value) {
                            ("name", Value::String(name)) => origin.name = Some(name),
                            ("file", Value::String(file)) => origin.file = Some(file),
                            ("line", Value::Int(line)) => origin.line = Some(*line),
                            _ => {}
                        }
                    }
                }
                _ => rest.push(attr),
            }
        }

        (origin, rest)
    }
}

#[derive(Debug, Clone)]
pub struct HumanHandler {
    writer: Option<SharedWriter>,
    level: Level,
    fields: HumanFields,
    time_layout: TimeLayout,
    /// Never empty: `frames[0]` is the unnamed root frame
    frames: Vec<Frame>,
}

impl HumanHandler {
    pub fn new(writer: SharedWriter) -> Self {
        Self {
            writer: Some(writer),
            ..Self::default()
        }
    }

    /// Set the minimum level handled
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: HumanFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_time_layout(mut self, layout: TimeLayout) -> Self {
        self.time_layout = layout;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Render `record` as one newline-terminated line
    pub fn render(&self, record: &Record) -> String {
        let (origin, rest) = Origin::extract(&record.attrs);

        let mut prefix: Vec<Cow<'_, str>> = Vec::with_capacity(6);
        if !self.fields.omit_time {
            prefix.push(Cow::Owned(self.time_layout.format(&record.time)));
        }
        if !self.fields.omit_pid {
            if let Some(pid) = origin.pid {
                prefix.push(Cow::Owned(pid.to_string()));
            }
        }
        if !self.fields.omit_caller {
            if let Some(name) = origin.name.filter(|n| !n.is_empty()) {
                prefix.push(Cow::Borrowed(name));
            }
            if let Some(file) = origin.file.filter(|f| !f.is_empty()) {
                prefix.push(relative_to_cwd(file));
            }
            if let Some(line) = origin.line {
                prefix.push(Cow::Owned(line.to_string()));
            }
        }
        if !self.fields.omit_level {
            prefix.push(record.level.name());
        }

        let mut line = prefix.join(":");
        if !prefix.is_empty() {
            line.push(' ');
        }
        line.push_str(&record.message);

        let root = self.frame_items(0, &rest);
        if !root.is_empty() {
            line.push(' ');
            line.push_str(&root.join(" "));
        }

        line.push('\n');
        line
    }

    /// Everything rendered inside frame `idx`: its bound attributes, the
    /// record's own attributes when it is the innermost frame, then the
    /// next frame wrapped in parentheses.
    fn frame_items<'a>(&'a self, idx: usize, record_attrs: &[&Attr]) -> Vec<Cow<'a, str>> {
        let frame = &self.frames[idx];
        let mut items: Vec<Cow<'a, str>> = frame
            .attrs
            .iter()
            .map(|a| Cow::Borrowed(a.as_str()))
            .collect();

        if idx + 1 == self.frames.len() {
            items.extend(record_attrs.iter().map(|a| Cow::Owned(a.to_string())));
        } else if let Some(group) = self.render_group(idx + 1, record_attrs) {
            items.push(Cow::Owned(group));
        }

        items
    }

    /// `(name: ...)` for frame `idx`, or `None` when nothing at or below it
    /// has content
    fn render_group(&self, idx: usize, record_attrs: &[&Attr]) -> Option<String> {
        let items = self.frame_items(idx, record_attrs);
        if items.is_empty() {
            return None;
        }
        let name = self.frames[idx].name.as_deref().unwrap_or_default();
        Some(format!("({}: {})", name, items.join(" ")))
    }
}

impl Default for HumanHandler {
    /// A handler without a writer; it is never enabled
    fn default() -> Self {
        Self {
            writer: None,
            level: Level::INFO,
            fields: HumanFields::default(),
            time_layout: TimeLayout::default(),
            frames: vec![Frame::default()],
        }
    }
}

impl Handler for HumanHandler {
    fn enabled(&self, level: Level) -> bool {
        self.writer.is_some() && level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<()> {
        match self.writer {
            Some(ref writer) => writer.write_line(self.render(record).as_bytes()),
            None => Ok(()),
        }
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        if let Some(frame) = derived.frames.last_mut() {
            frame.attrs.extend(attrs.iter().map(ToString::to_string));
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

/// Rewrite an absolute `path` relative to the working directory, unless the
/// relative form would be longer
fn relative_to_cwd(path: &str) -> Cow<'_, str> {
    let Ok(cwd) = std::env::current_dir() else {
        return Cow::Borrowed(path);
    };

    match relative_path(&cwd, Path::new(path)) {
        Some(rel) => {
            let rel = rel.to_string_lossy();
            if rel.len() <= path.len() {
                Cow::Owned(rel.into_owned())
            } else {
                Cow::Borrowed(path)
            }
        }
        None => Cow::Borrowed(path),
    }
}

/// `target` expressed relative to `base`; both must be absolute
fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    if !base.is_absolute() || !target.is_absolute() {
        return None;
    }

    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();
    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

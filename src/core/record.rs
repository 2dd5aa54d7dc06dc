//! Log record structure

use super::caller::Caller;
use super::level::Level;
use super::value::Attr;
use chrono::{DateTime, Utc};

/// Key of the synthetic process id attribute attached to every record
pub const PID_KEY: &str = "pid";

/// One log event, built by the logger and handed to a handler by reference
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Append the synthetic `caller` group and `pid` attributes
    #[must_use]
    pub fn with_origin(mut self, caller: &Caller, pid: u32) -> Self {
        self.attrs.push(caller.to_attr());
        self.attrs.push(Attr::new(PID_KEY, i64::from(pid)));
        self
    }

    pub fn add(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }
}

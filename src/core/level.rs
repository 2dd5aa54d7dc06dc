//! Severity levels
//!
//! Levels are signed integers so that handlers can compare them with a plain
//! `>=`. The four conventional levels sit four apart (Debug = -4, Info = 0,
//! Warn = 4, Error = 8) which leaves room for custom levels in between;
//! [`Level::TRACE`] sits below the conventional minimum at -8.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    pub const TRACE: Level = Level(-8);
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(severity: i32) -> Self {
        Level(severity)
    }

    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Name as understood by the four-level scale.
    ///
    /// Values between the named points are rendered relative to the nearest
    /// level below them (`INFO+2`, `DEBUG-1`). Trace has no name on this
    /// scale and comes out as `DEBUG-4`; use [`Level::name`] for output.
    pub fn conventional_name(self) -> String {
        let (base, anchor) = if self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if self < Level::WARN {
            ("INFO", Level::INFO)
        } else if self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        };

        let offset = self.0 - anchor.0;
        if offset == 0 {
            base.to_string()
        } else {
            format!("{}{:+}", base, offset)
        }
    }

    /// Canonical uppercase name, with Trace substituted before the
    /// conventional renderer sees it.
    pub fn name(self) -> Cow<'static, str> {
        match self {
            Level::TRACE => Cow::Borrowed("TRACE"),
            Level::DEBUG => Cow::Borrowed("DEBUG"),
            Level::INFO => Cow::Borrowed("INFO"),
            Level::WARN => Cow::Borrowed("WARN"),
            Level::ERROR => Cow::Borrowed("ERROR"),
            other => Cow::Owned(other.conventional_name()),
        }
    }

    fn parse_conventional(s: &str) -> Option<Self> {
        let (name, offset) = match s.find(['+', '-']) {
            Some(idx) => (&s[..idx], s[idx..].parse::<i32>().ok()?),
            None => (s, 0),
        };

        let base = match name.to_uppercase().as_str() {
            "DEBUG" => Level::DEBUG,
            "INFO" => Level::INFO,
            "WARN" => Level::WARN,
            "ERROR" => Level::ERROR,
            _ => return None,
        };

        Some(Level(base.0.checked_add(offset)?))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("TRACE") {
            return Ok(Level::TRACE);
        }

        Self::parse_conventional(s).ok_or_else(|| LoggerError::invalid_level(s))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

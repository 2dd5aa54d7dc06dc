//! Timestamp layouts for the human-readable handler
//!
//! Every layout renders in UTC. The default is a compact RFC 3339 form
//! without separators (`20250108T103045Z`), which keeps the field block of a
//! human line free of `:` characters inside the timestamp itself.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// strftime layout of [`TimeLayout::CompactRfc3339`]
pub const COMPACT_RFC3339_LAYOUT: &str = "%Y%m%dT%H%M%SZ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLayout {
    /// `20250108T103045Z`
    #[default]
    CompactRfc3339,

    /// `2025-01-08T10:30:45Z`
    Rfc3339,

    /// `2025-01-08T10:30:45.123456789Z`
    Rfc3339Nano,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_structured_logger::core::TimeLayout;
    ///
    /// let layout = TimeLayout::Custom("%Y-%m-%d".to_string());
    /// ```
    Custom(String),
}

impl TimeLayout {
    /// Check that a custom layout only uses known strftime specifiers
    pub fn validate(&self) -> Result<()> {
        match self {
            TimeLayout::Custom(format_str)
                if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) =>
            {
                Err(LoggerError::config(
                    "time layout",
                    format!("unknown specifier in '{}'", format_str),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Format a timestamp according to this layout
    ///
    /// A custom layout that cannot be rendered falls back to
    /// [`TimeLayout::CompactRfc3339`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_structured_logger::core::TimeLayout;
    /// use chrono::Utc;
    ///
    /// let stamp = TimeLayout::default().format(&Utc::now());
    /// assert!(stamp.ends_with('Z'));
    /// assert_eq!(stamp.len(), 16);
    /// ```
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimeLayout::CompactRfc3339 => datetime.format(COMPACT_RFC3339_LAYOUT).to_string(),
            TimeLayout::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimeLayout::Rfc3339Nano => datetime.to_rfc3339_opts(SecondsFormat::Nanos, true),
            TimeLayout::Unix => datetime.timestamp().to_string(),
            TimeLayout::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(COMPACT_RFC3339_LAYOUT).to_string(),
                }
            }
        }
    }
}

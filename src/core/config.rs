//! Logger configuration
//!
//! Holds the mutable formatting surface of a [`Logger`](crate::Logger): the
//! argument separator, the strftime-style date format, and the minimum
//! severity. Configuration is expected to be set before concurrent logging
//! begins; changing it while producer threads are active is not synchronized
//! with in-flight calls.

use super::log_level::LogLevel;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DEFAULT_SEPARATOR: &str = " ";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// String placed between the arguments of a single leveled call
    pub separator: String,
    /// strftime-compatible pattern; an empty string disables the timestamp
    /// prefix entirely
    pub date_format: String,
    /// Calls below this level are no-ops with zero side effects
    pub min_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            min_level: LogLevel::Debug,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Render the current local time through `fmt`, with the `" - "` suffix that
/// separates the timestamp from the level tag.
///
/// Returns `None` when `fmt` is empty (timestamping disabled) or malformed.
/// A bad pattern silently omits the prefix rather than failing the log call;
/// logging must never throw back into application control flow.
pub(crate) fn timestamp_prefix(fmt: &str) -> Option<String> {
    if fmt.is_empty() {
        return None;
    }

    let mut rendered = String::new();
    match write!(rendered, "{}", Local::now().format(fmt)) {
        Ok(()) => {
            rendered.push_str(" - ");
            Some(rendered)
        }
        Err(_) => None,
    }
}

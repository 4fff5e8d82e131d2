//! Ready-made sink functions
//!
//! A sink is any `Fn(&str) + Send + Sync`; the worker thread calls it with
//! each finished line. These constructors cover the common targets so that
//! embedders only write their own for networks or test capture.

use crate::core::{LogLevel, Result};
use colored::Colorize;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Write each line plus a trailing newline to standard output. This is the
/// default sink of a freshly built logger.
pub fn stdout() -> impl Fn(&str) + Send + Sync {
    |line: &str| println!("{}", line)
}

/// Write each line plus a trailing newline to standard error.
pub fn stderr() -> impl Fn(&str) + Send + Sync {
    |line: &str| eprintln!("{}", line)
}

/// Write to standard output, coloring each line by the level tag it carries.
/// Lines without a recognizable tag are printed unchanged.
pub fn colored_stdout() -> impl Fn(&str) + Send + Sync {
    |line: &str| match detect_level(line) {
        Some(level) => println!("{}", line.color(level.color_code())),
        None => println!("{}", line),
    }
}

/// Append lines to a file, opening it on construction.
///
/// Combines well with the logger's init hook for deferred setup, or can be
/// installed directly via [`Logger::set_sink`](crate::Logger::set_sink).
/// Each line is flushed as it is written; the worker is the only caller, so
/// the mutex is uncontended and only satisfies the `Fn` signature.
///
/// # Example
///
/// ```no_run
/// use logline::{sinks, Logger};
///
/// let logger = Logger::builder()
///     .sink(sinks::file("/var/log/app.log").expect("open log file"))
///     .build();
/// logger.info("to the file");
/// ```
pub fn file(path: impl Into<PathBuf>) -> Result<impl Fn(&str) + Send + Sync> {
    let path = path.into();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let writer = Mutex::new(BufWriter::new(file));

    Ok(move |line: &str| {
        let mut writer = writer.lock();
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    })
}

fn detect_level(line: &str) -> Option<LogLevel> {
    for level in [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ] {
        if line.contains(level.tag()) {
            return Some(level);
        }
    }
    if line.contains("CRITIC: ") {
        return Some(LogLevel::Fatal);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Logger;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_level() {
        assert_eq!(detect_level("ERROR: boom"), Some(LogLevel::Error));
        assert_eq!(
            detect_level("2025-01-08 10:30:45 - INFO: fine"),
            Some(LogLevel::Info)
        );
        assert_eq!(detect_level("CRITIC: meltdown"), Some(LogLevel::Fatal));
        assert_eq!(detect_level("no tag here"), None);
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log_file = temp_dir.path().join("sink_test.log");

        let logger = Logger::builder()
            .date_format("")
            .sink(file(log_file.clone()).expect("Failed to open sink file"))
            .build();

        logger.info("first");
        logger.warn("second");
        logger.close();

        let content = fs::read_to_string(&log_file).expect("Failed to read log file");
        assert_eq!(content, "INFO: first\nWARN: second\n");
    }

    #[test]
    fn test_file_sink_invalid_path_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing_dir = temp_dir.path().join("no-such-dir").join("app.log");
        assert!(file(missing_dir).is_err());
    }
}

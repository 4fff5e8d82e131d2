//! Logging macros for multi-argument calls.
//!
//! The leveled methods on [`Logger`](crate::Logger) take one `Display`
//! value; these macros accept any number of them and fold the logger's
//! configured separator between the rendered arguments.
//!
//! # Examples
//!
//! ```
//! use logline::{info, Logger};
//!
//! let logger = Logger::new();
//!
//! let port = 8080;
//! info!(logger, "listening on port", port);
//!
//! // With a custom separator
//! logger.set_separator(", ");
//! info!(logger, "a", "b", "c");
//! ```

/// Log any number of `Display` values at an explicit level.
///
/// # Examples
///
/// ```
/// # use logline::{log, Logger, LogLevel};
/// # let logger = Logger::new();
/// log!(logger, LogLevel::Info, "status", 200);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log_parts($level, &[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

/// Log debug-level values.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg),+)
    };
}

/// Log info-level values.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg),+)
    };
}

/// Log warning-level values.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg),+)
    };
}

/// Log error-level values.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg),+)
    };
}

/// Log fatal-level values.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg),+)
    };
}

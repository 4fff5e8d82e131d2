//! # Logline
//!
//! An asynchronous line-oriented logging facility: producer threads format
//! and submit log lines without ever blocking on the eventual sink.
//!
//! ## Features
//!
//! - **Single worker**: one background thread per logger drains a FIFO job
//!   queue; only it ever calls the sink
//! - **Per-thread FIFO**: a thread's lines reach the sink in program order
//! - **Lazy init**: a one-shot hook runs with the first log call, so setup
//!   cost is only paid if logging actually happens
//! - **Severity streams**: build a line piecewise with `append` before it is
//!   submitted as a whole
//!
//! ## Example
//!
//! ```
//! use logline::Logger;
//!
//! let logger = Logger::new();
//! logger.info("server started");
//! logger.close(); // drain everything and join the worker
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        InitHook, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        Result, SeverityStream, Sink,
    };
}

pub use crate::core::{
    InitHook, Job, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Result, ScratchRegistry, SeverityStream, Sink, Worker, DEFAULT_DATE_FORMAT, DEFAULT_SEPARATOR,
};

//! Core logger types

pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod scratch;
pub mod stream;
pub mod worker;

pub use config::{LoggerConfig, DEFAULT_DATE_FORMAT, DEFAULT_SEPARATOR};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{InitHook, Logger, LoggerBuilder, Sink};
pub use metrics::LoggerMetrics;
pub use scratch::ScratchRegistry;
pub use stream::SeverityStream;
pub use worker::{Job, Worker};

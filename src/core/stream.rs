//! Severity stream buffers for incremental line building
//!
//! A severity stream is a staging buffer that lets a single logical writer
//! build one log line piecewise before it is handed to the worker as a whole.
//! There is one buffer per severity (debug/info/warn/error); selecting a
//! stream flushes whatever the other buffers hold, so two interleaved
//! severities never merge into one message.
//!
//! This interface models one writer composing a line. Concurrent use of the
//! streams of a single logger from multiple threads without external
//! synchronization interleaves appends unpredictably and is the caller's
//! responsibility to avoid.

use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt::Display;

/// Number of severity buffers. Fatal has no stream; the original interface
/// stops at error.
pub(crate) const STREAM_SLOTS: usize = 4;

pub(crate) fn stream_slot(level: LogLevel) -> usize {
    match level {
        LogLevel::Debug => 0,
        LogLevel::Info => 1,
        LogLevel::Warning => 2,
        // Fatal shares the error buffer, like the critical tag does.
        LogLevel::Error | LogLevel::Fatal => 3,
    }
}

#[derive(Default)]
pub(crate) struct StreamState {
    pub(crate) buffers: [String; STREAM_SLOTS],
}

impl StreamState {
    /// Take every non-empty buffer, each one becoming exactly one line.
    pub(crate) fn drain(&mut self) -> Vec<String> {
        self.buffers
            .iter_mut()
            .filter(|buffer| !buffer.is_empty())
            .map(std::mem::take)
            .collect()
    }
}

/// Builder bound to one severity buffer, returned by the `*_stream` methods
/// on [`Logger`].
///
/// # Example
///
/// ```
/// use logline::Logger;
///
/// let logger = Logger::builder().date_format("").build();
/// logger.info_stream().append("request took ").append(42).append("ms");
/// logger.flush();
/// ```
pub struct SeverityStream<'a> {
    logger: &'a Logger,
    slot: usize,
}

impl<'a> SeverityStream<'a> {
    pub(crate) fn new(logger: &'a Logger, slot: usize) -> Self {
        Self { logger, slot }
    }

    /// Append a value to the severity buffer. The line stays staged until a
    /// flush, a stream switch, or logger shutdown.
    pub fn append<T: Display>(&self, value: T) -> &Self {
        self.logger.stream_append(self.slot, value);
        self
    }

    /// Convert every non-empty severity buffer into a queued line.
    pub fn flush(&self) {
        self.logger.flush_streams();
    }
}

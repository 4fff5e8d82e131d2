//! Main logger implementation

use super::{
    config::{timestamp_prefix, LoggerConfig},
    error::{LoggerError, Result},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    scratch::ScratchRegistry,
    stream::{stream_slot, SeverityStream, StreamState},
    worker::Worker,
};
use parking_lot::{Mutex, RwLock};
use std::fmt::{Display, Write as _};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

/// The user-supplied function that ultimately consumes a finished log line.
///
/// Called from the worker thread only; the sink does not need to be
/// reentrant beyond being `Send + Sync`.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// One-shot hook run synchronously by the first log call, before any line
/// can reach the sink. Used for deferred resource setup, e.g. opening a log
/// file only if logging actually occurs.
pub type InitHook = Box<dyn FnOnce() + Send>;

/// Asynchronous line logger.
///
/// Producer threads format complete lines and hand them as jobs to a single
/// background worker; only the worker ever invokes the sink. Lifecycle is
/// `Uninitialized -> Initialized -> Closed`: the init hook runs lazily,
/// exactly once, triggered by the first submitting call; [`close`] (or drop)
/// flushes the severity stream buffers, drains the queue to completion and
/// joins the worker.
///
/// Log calls issued after [`close`] are silently dropped and counted in
/// [`metrics`]; use [`try_log`] to get a [`LoggerError::Closed`] instead.
///
/// `Logger` is deliberately not `Clone`: the worker thread and its queue
/// cannot be meaningfully duplicated. Moving a logger is ordinary Rust
/// ownership transfer and needs no ceremony.
///
/// [`close`]: Logger::close
/// [`metrics`]: Logger::metrics
/// [`try_log`]: Logger::try_log
pub struct Logger {
    config: RwLock<LoggerConfig>,
    sink: RwLock<Sink>,
    init_once: Once,
    init_hook: Mutex<Option<InitHook>>,
    scratch: ScratchRegistry,
    streams: Mutex<StreamState>,
    /// Fast-path gate so the per-call stream flush skips the stream lock
    /// when nothing is staged.
    streams_dirty: AtomicBool,
    closed: AtomicBool,
    metrics: Arc<LoggerMetrics>,
    worker: Worker,
}

impl Logger {
    /// Create a logger with default configuration and a stdout sink.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logline::{Logger, LogLevel};
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Info)
    ///     .separator(", ")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // --- configuration surface ---
    //
    // Expected to be set before concurrent logging begins; changes racing
    // active log calls are not synchronized with lines already in flight.

    pub fn set_min_level(&self, level: LogLevel) {
        self.config.write().min_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        self.config.read().min_level
    }

    /// Set the string placed between the arguments of one leveled call.
    pub fn set_separator(&self, separator: impl Into<String>) {
        self.config.write().separator = separator.into();
    }

    /// Set the strftime timestamp pattern. An empty string disables the
    /// timestamp prefix entirely; a malformed pattern is silently omitted.
    pub fn set_date_format(&self, format: impl Into<String>) {
        self.config.write().date_format = format.into();
    }

    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    /// Replace the sink. Jobs already queued keep the sink they captured at
    /// enqueue time.
    pub fn set_sink<F>(&self, sink: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.sink.write() = Arc::new(sink);
    }

    /// Install the one-shot init hook. Only effective before the first log
    /// call has triggered initialization. The hook must not log through this
    /// logger itself.
    pub fn set_init_hook<F>(&self, hook: F)
    where
        F: FnOnce() + Send + 'static,
    {
        *self.init_hook.lock() = Some(Box::new(hook));
    }

    // --- leveled calls ---

    pub fn log(&self, level: LogLevel, message: impl Display) {
        self.log_parts(level, &[&message as &dyn Display]);
    }

    /// Build one line from `parts`, folding the configured separator between
    /// them (no trailing separator), and queue it for the sink.
    ///
    /// A call below the configured minimum level is a no-op with zero side
    /// effects: no timestamp is computed and no buffer is touched.
    pub fn log_parts(&self, level: LogLevel, parts: &[&dyn Display]) {
        let (separator, date_format) = {
            let config = self.config.read();
            if level < config.min_level {
                return;
            }
            (config.separator.clone(), config.date_format.clone())
        };

        if self.closed.load(Ordering::Acquire) {
            self.metrics.record_dropped();
            return;
        }

        self.ensure_init();
        self.flush_streams();

        let line = self.scratch.with_buffer(|buffer| {
            buffer.clear();
            if let Some(prefix) = timestamp_prefix(&date_format) {
                buffer.push_str(&prefix);
            }
            buffer.push_str(level.tag());
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    buffer.push_str(&separator);
                }
                let _ = write!(buffer, "{}", part);
            }
            std::mem::take(buffer)
        });

        self.submit(line);
    }

    /// Like [`log`](Logger::log), but reports a closed logger instead of
    /// silently dropping the message.
    pub fn try_log(&self, level: LogLevel, message: impl Display) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::Closed);
        }
        self.log(level, message);
        Ok(())
    }

    #[inline]
    pub fn debug(&self, message: impl Display) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Display) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Display) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Display) {
        self.log(LogLevel::Fatal, message);
    }

    // --- severity streams ---

    pub fn debug_stream(&self) -> SeverityStream<'_> {
        self.select_stream(LogLevel::Debug, LogLevel::Debug.tag())
    }

    pub fn info_stream(&self) -> SeverityStream<'_> {
        self.select_stream(LogLevel::Info, LogLevel::Info.tag())
    }

    pub fn warn_stream(&self) -> SeverityStream<'_> {
        self.select_stream(LogLevel::Warning, LogLevel::Warning.tag())
    }

    pub fn error_stream(&self) -> SeverityStream<'_> {
        self.select_stream(LogLevel::Error, LogLevel::Error.tag())
    }

    /// Critical variant of [`error_stream`](Logger::error_stream): same
    /// buffer, "CRITIC: " tag.
    pub fn crit_stream(&self) -> SeverityStream<'_> {
        self.select_stream(LogLevel::Error, "CRITIC: ")
    }

    /// Flush every non-empty severity buffer, then seed the selected buffer
    /// with timestamp and tag. The flush-on-switch rule keeps interleaved
    /// severities in separate lines.
    fn select_stream(&self, level: LogLevel, tag: &str) -> SeverityStream<'_> {
        let slot = stream_slot(level);
        let date_format = self.config.read().date_format.clone();

        let pending = {
            let mut streams = self.streams.lock();
            let pending = streams.drain();
            let buffer = &mut streams.buffers[slot];
            if let Some(prefix) = timestamp_prefix(&date_format) {
                buffer.push_str(&prefix);
            }
            buffer.push_str(tag);
            pending
        };

        for line in pending {
            self.submit(line);
        }
        self.streams_dirty.store(true, Ordering::Release);

        SeverityStream::new(self, slot)
    }

    pub(crate) fn stream_append<T: Display>(&self, slot: usize, value: T) {
        let mut streams = self.streams.lock();
        let _ = write!(streams.buffers[slot], "{}", value);
        drop(streams);
        self.streams_dirty.store(true, Ordering::Release);
    }

    /// Convert every non-empty severity buffer into a queued line.
    pub(crate) fn flush_streams(&self) {
        if !self.streams_dirty.swap(false, Ordering::AcqRel) {
            return;
        }
        let pending = self.streams.lock().drain();
        for line in pending {
            self.submit(line);
        }
    }

    // --- lifecycle ---

    /// Block until every line queued before this call has reached the sink.
    ///
    /// Best-effort under concurrent producers: a racing thread can enqueue a
    /// new line behind the flush barrier.
    pub fn flush(&self) {
        self.flush_streams();
        self.worker.flush();
    }

    /// Flush the severity buffers, drain the queue to completion and join
    /// the worker thread. Idempotent; a second call is a no-op.
    ///
    /// This is the only hard barrier the logger offers: when it returns, the
    /// sink has observed every message enqueued before the call began.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.streams_dirty.store(false, Ordering::Release);
        let pending = self.streams.lock().drain();
        for line in pending {
            self.submit_unchecked(line);
        }

        self.worker.close();
    }

    /// Alias for [`close`](Logger::close).
    pub fn wait(&self) {
        self.close();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of lines queued but not yet consumed by the worker.
    pub fn pending_jobs(&self) -> usize {
        self.worker.len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Number of distinct threads that have composed lines through this
    /// logger.
    pub fn thread_count(&self) -> usize {
        self.scratch.thread_count()
    }

    // --- internals ---

    /// Run the init hook exactly once, blocking racing callers until it has
    /// completed. No job is enqueued (and thus none can execute) before this
    /// returns.
    fn ensure_init(&self) {
        self.init_once.call_once(|| {
            if let Some(hook) = self.init_hook.lock().take() {
                hook();
            }
        });
    }

    fn submit(&self, line: String) {
        if self.closed.load(Ordering::Acquire) {
            self.metrics.record_dropped();
            return;
        }
        self.submit_unchecked(line);
    }

    /// Bind `line` to the current sink and queue the job. Used directly by
    /// `close`, which has already flipped the closed flag.
    fn submit_unchecked(&self, line: String) {
        self.ensure_init();
        let sink = Arc::clone(&*self.sink.read());
        if self.worker.push(Box::new(move || sink(&line))) {
            self.metrics.record_enqueued();
        } else {
            self.metrics.record_dropped();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logline::{Logger, LogLevel};
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .separator(" | ")
///     .date_format("%H:%M:%S")
///     .sink(|line| eprintln!("{}", line))
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Sink,
    init_hook: Option<InitHook>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: Arc::new(|line: &str| println!("{}", line)),
            init_hook: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Set the argument separator
    #[must_use = "builder methods return a new value"]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Set the strftime timestamp pattern; empty disables timestamping
    #[must_use = "builder methods return a new value"]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    /// Set the sink the worker hands finished lines to
    #[must_use = "builder methods return a new value"]
    pub fn sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.sink = Arc::new(sink);
        self
    }

    /// Set the one-shot init hook run by the first log call
    #[must_use = "builder methods return a new value"]
    pub fn on_init<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.init_hook = Some(Box::new(hook));
        self
    }

    /// Build the Logger, spawning its worker thread
    pub fn build(self) -> Logger {
        let metrics = Arc::new(LoggerMetrics::new());

        Logger {
            config: RwLock::new(self.config),
            sink: RwLock::new(self.sink),
            init_once: Once::new(),
            init_hook: Mutex::new(self.init_hook),
            scratch: ScratchRegistry::new(),
            streams: Mutex::new(StreamState::default()),
            streams_dirty: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            metrics: Arc::clone(&metrics),
            worker: Worker::spawn(metrics),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Severity stream example
//!
//! Builds lines piecewise with the stream builders, shows flush-on-switch,
//! and routes output through the colored stdout sink with a lazily opened
//! log file on the side.
//!
//! Run with: cargo run --example stream_logging

use logline::{sinks, Logger};

fn main() {
    let logger = Logger::builder()
        .sink(sinks::colored_stdout())
        .on_init(|| eprintln!("(init hook: first log call just happened)"))
        .build();

    // Nothing printed yet; the init hook fires with this first call.
    logger.info("starting up");

    // Build one line in several appends.
    logger
        .info_stream()
        .append("processed ")
        .append(128)
        .append(" records in ")
        .append(42)
        .append("ms");

    // Switching severity flushes the staged info line first.
    logger.warn_stream().append("queue depth is ").append(9000);

    // Explicit flush delivers the staged warn line.
    logger.flush();

    logger.error("demo error line");
    logger.crit_stream().append("critical tag shares the error buffer");

    logger.close();
}

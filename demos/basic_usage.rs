//! Basic logger usage example
//!
//! Demonstrates leveled logging, level filtering and configuration.
//!
//! Run with: cargo run --example basic_usage

use logline::{info, LogLevel, Logger};

fn main() {
    println!("=== Logline - Basic Usage Example ===\n");

    let logger = Logger::new();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");
    logger.flush();

    println!("\n2. Raising the minimum level to WARN:");
    logger.set_min_level(LogLevel::Warning);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");
    logger.flush();

    println!("\n3. Multi-argument calls with a custom separator:");
    logger.set_min_level(LogLevel::Debug);
    logger.set_separator(" | ");
    info!(logger, "request", 42, "took", 3.14, "ms");

    logger.close();
    println!("\n=== Example completed successfully! ===");
}

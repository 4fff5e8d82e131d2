//! Multi-threaded logging example
//!
//! Three producer threads log concurrently while the single worker drains
//! the queue; each thread's lines reach the sink in its own program order.
//!
//! Run with: cargo run --example threaded_logging

use logline::{info, Logger};
use std::sync::Arc;
use std::thread;

fn main() {
    let logger = Arc::new(Logger::new());

    let thread_a = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..1000 {
                info!(logger, "A", i, "->", 3.14);
            }
        })
    };

    let thread_b = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..1000 {
                info!(logger, "B", i, "->", 3.14, ":)");
            }
        })
    };

    let thread_c = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..1000 {
                info!(logger, "C", i, "->", 3.14, 5, "alfa");
            }
        })
    };

    thread_a.join().unwrap();
    thread_b.join().unwrap();
    thread_c.join().unwrap();

    logger.close();
    eprintln!("delivered: {}", logger.metrics().delivered());
}

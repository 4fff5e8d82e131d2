//! Concurrency tests
//!
//! These tests verify:
//! - Per-thread FIFO ordering under concurrent producers
//! - Exactly-once lazy initialization when threads race the first call
//! - Drain completeness when close races active producers
//! - Scratch registry growth under many logging threads

use logline::{LogLevel, Logger};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

fn capture_logger() -> (Arc<Logger>, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let lines_clone = Arc::clone(&lines);
    let logger = Logger::builder()
        .date_format("")
        .sink(move |line| lines_clone.lock().push(line.to_string()))
        .build();
    (Arc::new(logger), lines)
}

#[test]
fn test_per_thread_fifo_three_producers() {
    // Three threads each log 0..999; the sink sees 3000 lines
    // and each thread's lines in ascending order.
    const THREADS: usize = 3;
    const PER_THREAD: usize = 1000;

    let (logger, lines) = capture_logger();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logline::info!(logger, format!("T{}", t), i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Producer thread panicked");
    }
    logger.close();

    let lines = lines.lock();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    for t in 0..THREADS {
        let marker = format!("INFO: T{} ", t);
        let indices: Vec<usize> = lines
            .iter()
            .filter(|line| line.starts_with(&marker))
            .map(|line| line[marker.len()..].parse().expect("sequence number"))
            .collect();
        assert_eq!(
            indices,
            (0..PER_THREAD).collect::<Vec<_>>(),
            "thread {} lines out of program order",
            t
        );
    }
}

#[test]
fn test_init_hook_exactly_once_under_race() {
    // The init hook runs exactly once no matter how many threads race
    // the first log call.
    const THREADS: usize = 16;

    let init_count = Arc::new(AtomicUsize::new(0));
    let init_clone = Arc::clone(&init_count);
    let logger = Arc::new(
        Logger::builder()
            .on_init(move || {
                init_clone.fetch_add(1, Ordering::SeqCst);
                // Widen the race window
                thread::sleep(std::time::Duration::from_millis(10));
            })
            .sink(|_| {})
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || logger.info(t))
        })
        .collect();

    for handle in handles {
        handle.join().expect("Producer thread panicked");
    }
    logger.close();

    assert_eq!(init_count.load(Ordering::SeqCst), 1);
    assert_eq!(logger.metrics().delivered(), THREADS as u64);
}

#[test]
fn test_close_races_active_producers() {
    // Producers racing close may be dropped, but every line accepted before
    // close began is delivered and nothing is delivered twice.
    let (logger, lines) = capture_logger();

    let producers: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..500 {
                    logline::info!(logger, t, i);
                }
            })
        })
        .collect();

    // Close somewhere in the middle of production
    thread::sleep(std::time::Duration::from_millis(5));
    logger.close();

    for handle in producers {
        handle.join().expect("Producer thread panicked");
    }

    let delivered = logger.metrics().delivered();
    let dropped = logger.metrics().dropped();
    assert_eq!(lines.lock().len() as u64, delivered);
    assert_eq!(delivered + dropped, 4 * 500);
}

#[test]
fn test_concurrent_close_is_safe() {
    let (logger, lines) = capture_logger();
    logger.info("once");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || logger.close())
        })
        .collect();
    for handle in handles {
        handle.join().expect("Closer thread panicked");
    }

    assert_eq!(lines.lock().len(), 1);
}

#[test]
fn test_scratch_registry_tracks_distinct_threads() {
    let (logger, _lines) = capture_logger();

    let handles: Vec<_> = (0..10)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger.debug(format!("{}:{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Producer thread panicked");
    }
    logger.close();

    // One buffer per producer thread, none evicted
    assert_eq!(logger.thread_count(), 10);
    assert_eq!(logger.metrics().delivered(), 500);
}

#[test]
fn test_interleaved_levels_from_many_threads() {
    let (logger, lines) = capture_logger();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    match i % 3 {
                        0 => logger.debug(format!("{}-{}", t, i)),
                        1 => logger.warn(format!("{}-{}", t, i)),
                        _ => logger.error(format!("{}-{}", t, i)),
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Producer thread panicked");
    }
    logger.close();

    let lines = lines.lock();
    assert_eq!(lines.len(), 400);
    assert_eq!(lines.iter().filter(|l| l.starts_with("DEBUG: ")).count(), 4 * 34);
    assert_eq!(lines.iter().filter(|l| l.starts_with("WARN: ")).count(), 4 * 33);
    assert_eq!(lines.iter().filter(|l| l.starts_with("ERROR: ")).count(), 4 * 33);
}

#[test]
fn test_set_level_before_spawning_producers() {
    // Nothing below the minimum ever reaches the sink, even under load.
    let (logger, lines) = capture_logger();
    logger.set_min_level(LogLevel::Warning);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..200 {
                    logger.info(format!("hidden {} {}", t, i));
                    logger.error(format!("visible {} {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Producer thread panicked");
    }
    logger.close();

    let lines = lines.lock();
    assert_eq!(lines.len(), 800);
    assert!(lines.iter().all(|line| line.starts_with("ERROR: visible")));
}

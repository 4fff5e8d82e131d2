//! Background worker: the single consumer of the job queue
//!
//! The worker owns one dedicated thread that drains a FIFO queue of deferred
//! jobs. Producers only touch the queue to append; the consumer executes each
//! job outside any lock, so a slow sink never blocks enqueue calls. The queue
//! is an unbounded channel: when it is empty the consumer blocks in `recv()`
//! at ~0 CPU, and dropping the producer side acts as the stop sentinel.

use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A deferred, single-execution unit of work: a finished log line bound to
/// the sink that will consume it.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

enum Command {
    Run(Job),
    /// Flush marker; the worker acks once every job queued ahead of it has
    /// executed.
    Flush(Sender<()>),
}

pub struct Worker {
    sender: Mutex<Option<Sender<Command>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Worker {
    /// Spawn the consumer thread and return its producer handle.
    pub fn spawn(metrics: Arc<LoggerMetrics>) -> Self {
        let (sender, receiver) = unbounded();

        let handle = thread::spawn(move || Self::run(receiver, metrics));

        Self {
            sender: Mutex::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Consumer loop, executed on the worker thread for its entire lifetime.
    ///
    /// **Per-job panic isolation**: each job is wrapped in `catch_unwind` so
    /// a panicking sink cannot kill the loop and silently lose every
    /// subsequent message. The failure is surfaced on stderr and counted, and
    /// the loop resumes with the next job.
    fn run(receiver: Receiver<Command>, metrics: Arc<LoggerMetrics>) {
        while let Ok(command) = receiver.recv() {
            match command {
                Command::Run(job) => match catch_unwind(AssertUnwindSafe(job)) {
                    Ok(()) => {
                        metrics.record_delivered();
                    }
                    Err(panic_info) => {
                        let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                            s.to_string()
                        } else if let Some(s) = panic_info.downcast_ref::<String>() {
                            s.clone()
                        } else {
                            "Unknown panic".to_string()
                        };
                        eprintln!(
                            "[LOGGER CRITICAL] Sink panicked: {}. \
                             Subsequent messages continue to be delivered.",
                            panic_msg
                        );
                        metrics.record_sink_panic();
                    }
                },
                Command::Flush(ack) => {
                    // Queue order means everything enqueued before the
                    // marker has already run.
                    let _ = ack.send(());
                }
            }
        }
        // Channel disconnected: every producer handle is gone and the queue
        // has been drained to completion.
    }

    /// Append a job to the tail of the queue.
    ///
    /// Returns `false` once the worker has been closed. Never blocks the
    /// caller beyond the channel append itself.
    pub fn push(&self, job: Job) -> bool {
        match &*self.sender.lock() {
            Some(sender) => sender.send(Command::Run(job)).is_ok(),
            None => false,
        }
    }

    /// Block until every job enqueued before this call has executed.
    ///
    /// A concurrent producer can still race new jobs in behind the flush
    /// marker, so this is a convenience barrier, not a linearizable one.
    /// Returns immediately if the worker is closed.
    pub fn flush(&self) {
        let ack_receiver = {
            let guard = self.sender.lock();
            match &*guard {
                Some(sender) => {
                    let (ack_sender, ack_receiver) = bounded(1);
                    if sender.send(Command::Flush(ack_sender)).is_err() {
                        return;
                    }
                    ack_receiver
                }
                None => return,
            }
        };
        let _ = ack_receiver.recv();
    }

    /// Number of jobs queued but not yet picked up by the consumer.
    pub fn len(&self) -> usize {
        self.sender
            .lock()
            .as_ref()
            .map(|sender| sender.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the producer side of the queue and join the consumer thread.
    ///
    /// The disconnect is the stop signal: the consumer drains everything
    /// still queued, then terminates. Idempotent; a second call finds the
    /// handle already taken and returns without double-joining.
    pub fn close(&self) {
        let sender = self.sender.lock().take();
        drop(sender);

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Worker thread panicked during shutdown: {:?}", e);
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn new_worker() -> (Worker, Arc<LoggerMetrics>) {
        let metrics = Arc::new(LoggerMetrics::new());
        (Worker::spawn(Arc::clone(&metrics)), metrics)
    }

    #[test]
    fn test_jobs_run_in_fifo_order() {
        let (worker, _metrics) = new_worker();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..100 {
            let order = Arc::clone(&order);
            worker.push(Box::new(move || order.lock().push(i)));
        }
        worker.flush();

        assert_eq!(*order.lock(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_flush_waits_for_pending_jobs() {
        let (worker, metrics) = new_worker();

        for _ in 0..10 {
            worker.push(Box::new(|| thread::sleep(Duration::from_millis(1))));
        }
        worker.flush();

        assert_eq!(metrics.delivered(), 10);
        assert!(worker.is_empty());
    }

    #[test]
    fn test_close_drains_queue() {
        let (worker, metrics) = new_worker();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..50 {
            let counter = Arc::clone(&counter);
            worker.push(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        worker.close();

        assert_eq!(counter.load(Ordering::SeqCst), 50);
        assert_eq!(metrics.delivered(), 50);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (worker, _metrics) = new_worker();
        worker.push(Box::new(|| {}));
        worker.close();
        worker.close();
        assert!(worker.is_closed());
    }

    #[test]
    fn test_push_after_close_is_rejected() {
        let (worker, _metrics) = new_worker();
        worker.close();
        assert!(!worker.push(Box::new(|| {})));
    }

    #[test]
    fn test_panicking_job_does_not_kill_consumer() {
        let (worker, metrics) = new_worker();
        let counter = Arc::new(AtomicUsize::new(0));

        worker.push(Box::new(|| panic!("simulated sink failure")));
        let counter_clone = Arc::clone(&counter);
        worker.push(Box::new(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        }));
        worker.flush();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.sink_panics(), 1);
        assert_eq!(metrics.delivered(), 1);
    }

    #[test]
    fn test_flush_after_close_returns_immediately() {
        let (worker, _metrics) = new_worker();
        worker.close();
        worker.flush();
    }
}

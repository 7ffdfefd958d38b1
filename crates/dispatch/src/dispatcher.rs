//! Main-thread work dispatcher
//!
//! Background threads (mod loader threads, network callbacks, file I/O
//! completions) cannot touch engine state directly; they hand the work to
//! the dispatcher instead, and the engine's update loop drains it once per
//! tick on the thread that owns that state. Work enqueued from the owner
//! thread itself runs on the spot rather than waiting a tick.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::config::DispatchConfig;
use crate::sequence::{Sequence, SequenceRunner};

/// A unit of work to execute on the owner thread
pub type WorkItem = Box<dyn FnOnce() + Send + 'static>;

/// Cross-thread work queue drained on one designated owner thread.
///
/// Construct the dispatcher on the thread that will call
/// [`drain`](Self::drain); that thread's identity is captured once and
/// never changes. Producers on any thread call [`enqueue`](Self::enqueue),
/// the tick source calls `drain` once per tick, and the host calls
/// [`shutdown`](Self::shutdown) after all producers have stopped.
pub struct Dispatcher {
    /// Pending work, strict FIFO. Every access goes through this mutex.
    queue: Mutex<VecDeque<WorkItem>>,

    /// Thread that drains; same-thread fast-path invocation is legal only here.
    owner: ThreadId,

    /// Where sequences go. The dispatcher never steps one itself.
    runner: Arc<dyn SequenceRunner>,

    /// Drains slower than this log a warning.
    slow_drain_warn: Duration,
}

impl Dispatcher {
    /// Create a dispatcher owned by the current thread, with default config.
    pub fn new(runner: Arc<dyn SequenceRunner>) -> Self {
        Self::with_config(DispatchConfig::default(), runner)
    }

    /// Create a dispatcher owned by the current thread.
    ///
    /// The calling thread becomes the owner: the only thread `drain` may be
    /// called from, and the only thread on which `enqueue` runs work
    /// synchronously.
    pub fn with_config(config: DispatchConfig, runner: Arc<dyn SequenceRunner>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(config.initial_queue_capacity)),
            owner: thread::current().id(),
            runner,
            slow_drain_warn: Duration::from_millis(config.slow_drain_warn_ms),
        }
    }

    /// Check if the current thread is the owner thread.
    pub fn is_owner_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Run `work` on the owner thread.
    ///
    /// Called from the owner thread, `work` runs synchronously before this
    /// returns and the queue is untouched. Called from any other thread,
    /// `work` is appended to the queue and runs during a later
    /// [`drain`](Self::drain), in enqueue order relative to other queued
    /// items. No ordering holds between a synchronous invocation and items
    /// queued concurrently by other threads.
    ///
    /// A panic out of `work` on the synchronous path propagates to the
    /// caller.
    pub fn enqueue<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue_item(Box::new(work), false);
    }

    /// Queue `work` for the next drain even when called on the owner thread.
    pub fn enqueue_deferred<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue_item(Box::new(work), true);
    }

    /// Hand `sequence` to the runner from the owner thread.
    ///
    /// Wraps the hand-off in a work item and enqueues it with
    /// [`enqueue`](Self::enqueue) semantics: from the owner thread the
    /// runner receives the sequence before this returns, from any other
    /// thread during a later drain. The runner owns the sequence's
    /// multi-tick lifecycle from then on.
    pub fn enqueue_sequence(&self, sequence: Sequence) {
        let runner = Arc::clone(&self.runner);
        self.enqueue_item(Box::new(move || runner.begin(sequence)), false);
    }

    fn enqueue_item(&self, work: WorkItem, force_defer: bool) {
        // Same-thread dispatch needs neither the queue nor the lock.
        if !force_defer && self.is_owner_thread() {
            work();
            return;
        }

        self.queue.lock().push_back(work);
    }

    /// Run the work that was pending when the call started.
    ///
    /// Must be called from the owner thread, once per tick. Items are
    /// removed and invoked one at a time in FIFO order, with the lock
    /// released around every invocation so producers are never blocked
    /// behind a slow work item. Only items already queued when `drain`
    /// begins are run; anything enqueued while it runs, whether by a work
    /// item or by a concurrent producer, waits for the next tick.
    ///
    /// A panicking work item propagates out of `drain`; items behind it in
    /// that tick's batch were never removed and run on the next drain.
    ///
    /// Returns the number of items invoked.
    pub fn drain(&self) -> usize {
        debug_assert!(
            self.is_owner_thread(),
            "Dispatcher::drain called off the owner thread"
        );

        let start = Instant::now();
        let pending = self.queue.lock().len();

        let mut processed = 0;
        for _ in 0..pending {
            let Some(work) = self.queue.lock().pop_front() else {
                break;
            };
            work();
            processed += 1;
        }

        if processed > 0 {
            tracing::trace!("Drained {} work items", processed);
        }

        let elapsed = start.elapsed();
        if elapsed > self.slow_drain_warn {
            tracing::warn!(
                "Drain took {}ms for {} items",
                elapsed.as_millis(),
                processed
            );
        }

        processed
    }

    /// Final flush at teardown.
    ///
    /// Call from the owner thread after every producer thread has joined or
    /// is guaranteed not to enqueue again; drains whatever arrived after
    /// the last regular tick. Returns the number of items flushed.
    pub fn shutdown(&self) -> usize {
        let flushed = self.drain();
        tracing::info!("Dispatcher shut down, flushed {} work items", flushed);
        flushed
    }

    /// Number of items currently queued.
    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

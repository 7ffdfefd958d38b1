//! Resumable sequences and the runner seam
//!
//! A sequence is a unit of work spanning multiple ticks: each `next()` call
//! performs one step, `None` means it is finished. The dispatcher never
//! steps a sequence itself; it hands the boxed sequence to a
//! [`SequenceRunner`] on the owner thread and is done with it.

use parking_lot::Mutex;

/// A resumable unit of work. One `next()` call performs one step; `None`
/// means the sequence is finished.
pub type Sequence = Box<dyn Iterator<Item = ()> + Send + 'static>;

/// Entry point of whatever facility owns multi-tick execution.
///
/// `begin` takes ownership of the sequence and must return promptly; the
/// dispatcher calls it on the owner thread, possibly mid-drain.
pub trait SequenceRunner: Send + Sync {
    /// Take ownership of `sequence` and start running it.
    fn begin(&self, sequence: Sequence);
}

/// Reference runner that advances every live sequence one step per tick.
///
/// Hosts call [`step_all`](Self::step_all) once per tick after the drain.
/// Sequences handed over via [`begin`](SequenceRunner::begin) take their
/// first step on the following `step_all` call; finished sequences are
/// dropped.
#[derive(Default)]
pub struct StepRunner {
    live: Mutex<Vec<Sequence>>,
}

impl StepRunner {
    /// Create an empty runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every live sequence by one step, dropping finished ones.
    ///
    /// Returns the number of sequences still live afterwards.
    pub fn step_all(&self) -> usize {
        let mut live = self.live.lock();
        live.retain_mut(|sequence| sequence.next().is_some());
        live.len()
    }

    /// Number of sequences currently live.
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }
}

impl SequenceRunner for StepRunner {
    fn begin(&self, sequence: Sequence) {
        self.live.lock().push(sequence);
    }
}

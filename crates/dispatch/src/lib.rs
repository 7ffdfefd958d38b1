//! modkit dispatch - Main-thread work queue
//!
//! This crate is the cross-thread dispatch piece of the modkit modding
//! framework. Mod code running off the main thread (network callbacks,
//! file I/O completions, loader threads) must not touch engine state
//! directly; it hands the work to the dispatcher instead, and the engine's
//! update loop drains the queue once per tick on the main thread. Work
//! enqueued from the main thread itself skips the queue and runs
//! immediately.
//!
//! Two ways to hold a dispatcher:
//! - [`Dispatcher`] - an explicit instance, owned and wired by the host.
//! - [`global`] - a process-wide instance behind free functions.
//!
//! Long-running work that spans multiple ticks goes through
//! [`enqueue_sequence`](Dispatcher::enqueue_sequence), which hands a
//! [`Sequence`] to an injected [`SequenceRunner`]. [`StepRunner`] is a
//! ready-made runner that advances every live sequence one step per tick.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use modkit_dispatch::{Dispatcher, StepRunner};
//!
//! let runner = Arc::new(StepRunner::new());
//! let dispatcher = Dispatcher::new(runner.clone());
//!
//! // Producer threads defer work to the owner thread...
//! dispatcher.enqueue_deferred(|| println!("on the main thread"));
//!
//! // ...and the update loop drains once per tick.
//! dispatcher.drain();
//! runner.step_all();
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod global;
pub mod sequence;

pub use config::DispatchConfig;
pub use dispatcher::{Dispatcher, WorkItem};
pub use error::DispatchError;
pub use sequence::{Sequence, SequenceRunner, StepRunner};

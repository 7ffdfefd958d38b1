//! Process-wide dispatcher instance
//!
//! Frameworks that thread a single dispatcher through everything use this
//! module instead of passing a [`Dispatcher`] around. The update loop's
//! thread calls [`initialize`] once during startup, before any producer
//! thread exists; after that, producers call the free functions from any
//! thread and the update loop calls [`drain`] once per tick.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use modkit_dispatch::{global, StepRunner};
//!
//! // Update-loop thread, during startup:
//! global::initialize(Arc::new(StepRunner::new())).unwrap();
//!
//! // Any thread, any time:
//! global::enqueue(|| { /* touch engine state */ }).unwrap();
//!
//! // Update-loop thread, once per tick:
//! global::drain();
//!
//! // Update-loop thread, at teardown, after producers have stopped:
//! global::shutdown();
//! ```

use std::sync::{Arc, OnceLock};

use crate::config::DispatchConfig;
use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::sequence::{Sequence, SequenceRunner};

/// Process-wide dispatcher storage
static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();

/// Initialize the process-wide dispatcher with default config.
///
/// Must be called from the thread that will drive [`drain`], before any
/// producer thread starts. Returns an error if called twice.
pub fn initialize(runner: Arc<dyn SequenceRunner>) -> Result<(), DispatchError> {
    initialize_with_config(DispatchConfig::default(), runner)
}

/// Initialize the process-wide dispatcher.
///
/// The calling thread becomes the owner thread. Returns an error if called
/// twice.
pub fn initialize_with_config(
    config: DispatchConfig,
    runner: Arc<dyn SequenceRunner>,
) -> Result<(), DispatchError> {
    DISPATCHER
        .set(Dispatcher::with_config(config, runner))
        .map_err(|_| DispatchError::AlreadyInitialized)?;

    tracing::info!(
        "Dispatcher initialized, owner thread {:?}",
        std::thread::current().id()
    );
    Ok(())
}

fn instance() -> Result<&'static Dispatcher, DispatchError> {
    DISPATCHER.get().ok_or(DispatchError::NotInitialized)
}

/// Run `work` on the owner thread.
///
/// Synchronous when called from the owner thread, queued for the next
/// [`drain`] otherwise. Safe to call from any thread.
#[tracing::instrument(skip(work))]
pub fn enqueue<F>(work: F) -> Result<(), DispatchError>
where
    F: FnOnce() + Send + 'static,
{
    instance()?.enqueue(work);
    Ok(())
}

/// Queue `work` for the next drain even when called on the owner thread.
#[tracing::instrument(skip(work))]
pub fn enqueue_deferred<F>(work: F) -> Result<(), DispatchError>
where
    F: FnOnce() + Send + 'static,
{
    instance()?.enqueue_deferred(work);
    Ok(())
}

/// Hand `sequence` to the runner from the owner thread.
#[tracing::instrument(skip(sequence))]
pub fn enqueue_sequence(sequence: Sequence) -> Result<(), DispatchError> {
    instance()?.enqueue_sequence(sequence);
    Ok(())
}

/// Run the work that was pending when the call started.
///
/// Called once per tick from the owner thread. Returns the number of items
/// invoked; returns 0 (with a warning) before [`initialize`].
#[tracing::instrument]
pub fn drain() -> usize {
    match DISPATCHER.get() {
        Some(dispatcher) => dispatcher.drain(),
        None => {
            tracing::warn!("drain called before dispatcher initialization");
            0
        }
    }
}

/// Final flush at teardown.
///
/// Call from the owner thread after every producer has stopped. Returns
/// the number of items flushed. The queue stays empty afterwards as long
/// as the teardown contract holds.
pub fn shutdown() -> usize {
    match DISPATCHER.get() {
        Some(dispatcher) => dispatcher.shutdown(),
        None => {
            tracing::warn!("shutdown called before dispatcher initialization");
            0
        }
    }
}

/// Number of items currently queued, 0 before initialization.
pub fn pending_count() -> usize {
    DISPATCHER.get().map(Dispatcher::pending_count).unwrap_or(0)
}

/// Check if the process-wide dispatcher is initialized.
pub fn is_initialized() -> bool {
    DISPATCHER.get().is_some()
}

/// Check if the current thread is the owner thread.
///
/// `false` before initialization.
pub fn is_owner_thread() -> bool {
    DISPATCHER
        .get()
        .map(Dispatcher::is_owner_thread)
        .unwrap_or(false)
}

//! Error types for dispatcher lifecycle operations

/// Error type for dispatcher lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The process-wide dispatcher was initialized more than once
    #[error("Dispatcher already initialized")]
    AlreadyInitialized,

    /// An operation needed the process-wide dispatcher before `initialize`
    #[error("Dispatcher not initialized")]
    NotInitialized,
}

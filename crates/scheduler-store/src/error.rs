//! Error types for work order store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Unknown IDs on update or delete are not errors: those calls leave the
/// collection unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Work center already registered.
    #[error("work center already exists: {0}")]
    DuplicateWorkCenter(String),

    /// Lock poisoned (thread panicked while holding lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// The in-memory stores in this crate never fail; the variants exist for
/// durable backends that implement the same traits.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing data is corrupted.
    #[error("store corrupted: {0}")]
    Corrupted(String),

    /// The store is closed.
    #[error("store is closed")]
    Closed,

    /// A batch write failed part-way through.
    ///
    /// `applied` operations reached the target store before the failure.
    #[error("batch write failed after {applied} operations: {source}")]
    BatchFailed {
        /// Number of operations applied before the failure.
        applied: usize,
        /// The error raised by the failing operation.
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}

//! Error types for LayerKV
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Reads never fail: a missing key is a `None` result, not an error. The
//! only runtime failure is ending a transaction when none is open.

use thiserror::Error;

/// Result type alias for LayerKV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for LayerKV
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Commit or rollback requested with an empty overlay stack
    #[error("No active transaction to {operation}")]
    NoActiveTransaction {
        /// The operation that was attempted ("commit" or "rollback")
        operation: &'static str,
    },

    /// Store configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns true if this is a `NoActiveTransaction` error
    pub fn is_no_active_transaction(&self) -> bool {
        matches!(self, Error::NoActiveTransaction { .. })
    }
}

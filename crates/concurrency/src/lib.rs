//! Concurrency layer for LayerKV
//!
//! This crate implements nested transactions over a single keyspace with:
//! - TransactionalStore: base store plus a stack of overlays
//! - ApplyResult / PendingOperations: commit and rollback summaries
//! - SharedStore: one store behind a single mutex for multi-threaded callers
//!
//! There is no MVCC and no conflict detection. A transaction is a pending
//! change layer; commit folds it into the enclosing layer and rollback
//! drops it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod shared;
pub mod store;

pub use layerkv_storage::PendingOperations;
pub use shared::SharedStore;
pub use store::{ApplyResult, TransactionalStore};

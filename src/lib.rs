//! LayerKV - Embeddable in-memory key-value store with nested transactions
//!
//! LayerKV keeps a base store plus a stack of pending-change overlays, one
//! per open transaction. Writes land in the innermost overlay, reads scan
//! from the innermost overlay down to the base store, commit folds an
//! overlay into the layer below and rollback drops it.
//!
//! # Quick Start
//!
//! ```
//! use layerkv::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.set("a", "5");
//!
//! store.begin();
//! store.set("a", "15");
//! store.begin();
//! store.delete("a");
//! assert!(store.get("a").is_none());
//! assert!(store.rollback());
//! assert!(store.commit());
//!
//! assert_eq!(store.get("a").map(|v| v.as_str()), Some("15"));
//! ```
//!
//! # Architecture
//!
//! - `layerkv-core`: Key, Value, Record, Lookup, Error, StoreConfig
//! - `layerkv-storage`: BaseStore and Overlay
//! - `layerkv-concurrency`: TransactionalStore and SharedStore
//!
//! Nothing is persisted. Values are opaque text.

pub use layerkv_concurrency::{ApplyResult, PendingOperations, SharedStore, TransactionalStore};
pub use layerkv_core::{Error, Key, KvRead, Lookup, Record, Result, StoreConfig, Value};
pub use layerkv_storage::{BaseStore, Overlay};

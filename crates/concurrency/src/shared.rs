//! SharedStore: a TransactionalStore behind one mutex
//!
//! `TransactionalStore` is single-threaded. To share one store between
//! threads, every operation must be serialized against a single lock
//! guarding the whole overlay stack, including the pop-then-merge sequence
//! inside commit. `SharedStore` is that lock.
//!
//! ## Closure API
//!
//! Single calls (`set`, `begin`, `commit`, ...) each take the lock
//! separately, so a transaction opened with `begin` is visible to every
//! other handle until it ends. To group operations without interleaving,
//! use [`SharedStore::transaction`], which holds the lock for the whole
//! closure and commits on `Ok` / rolls back on `Err`.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use layerkv_core::{Key, Value};
use parking_lot::Mutex;
use tracing::warn;

use crate::store::TransactionalStore;

/// Cloneable, thread-safe handle to one transactional store
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<TransactionalStore>>,
}

impl SharedStore {
    /// Wrap an existing store
    pub fn new(store: TransactionalStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Set `key` to `value` in the current scope
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.inner.lock().set(key, value);
    }

    /// Delete `key` in the current scope
    pub fn delete(&self, key: impl Into<Key>) {
        self.inner.lock().delete(key);
    }

    /// Get an owned copy of the value visible for `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.lock().get(key).cloned()
    }

    /// Open a nested transaction, returning its ID
    pub fn begin(&self) -> u64 {
        self.inner.lock().begin()
    }

    /// Commit the innermost transaction; false if none is open
    pub fn commit(&self) -> bool {
        self.inner.lock().commit()
    }

    /// Roll back the innermost transaction; false if none is open
    pub fn rollback(&self) -> bool {
        self.inner.lock().rollback()
    }

    /// Number of open transactions
    pub fn depth(&self) -> usize {
        self.inner.lock().depth()
    }

    /// Materialize every visible key and value
    pub fn snapshot(&self) -> BTreeMap<Key, Value> {
        self.inner.lock().snapshot()
    }

    /// Run `f` with exclusive access to the store
    pub fn with<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut TransactionalStore) -> T,
    {
        let mut store = self.inner.lock();
        f(&mut *store)
    }

    /// Run `f` inside a transaction, holding the lock throughout
    ///
    /// Begins a transaction, runs `f`, then commits it if `f` returned `Ok`
    /// or rolls it back if `f` returned `Err`. The error is returned
    /// unchanged. If `f` panics, the transaction is rolled back and the
    /// panic resumes.
    ///
    /// `f` may open and close nested transactions of its own. Any it leaves
    /// open are rolled back before the outcome is applied. If `f` ends the
    /// transaction opened here itself, no commit or rollback is applied,
    /// even if `f` then began a new transaction at the same depth.
    pub fn transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut TransactionalStore) -> std::result::Result<T, E>,
    {
        let mut store = self.inner.lock();
        let id = store.begin();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| f(&mut *store)));

        let leftover = store.transactions_since(id);
        if leftover > 0 {
            warn!(
                store = %store.config().label,
                unbalanced = leftover,
                "rolling back transactions left open by closure"
            );
            let depth = store.depth() - leftover;
            store.rollback_to(depth);
        }

        if store.transaction_id() == Some(id) {
            match &outcome {
                Ok(Ok(_)) => {
                    store.commit();
                }
                _ => {
                    store.rollback();
                }
            }
        } else {
            warn!(
                store = %store.config().label,
                txn_id = id,
                "closure ended its own transaction"
            );
        }

        match outcome {
            Ok(result) => result,
            Err(payload) => {
                warn!(
                    store = %store.config().label,
                    txn_id = id,
                    "closure panicked, transaction rolled back"
                );
                drop(store);
                panic::resume_unwind(payload)
            }
        }
    }
}

impl From<TransactionalStore> for SharedStore {
    fn from(store: TransactionalStore) -> Self {
        Self::new(store)
    }
}

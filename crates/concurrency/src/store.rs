//! TransactionalStore: base store plus a stack of overlays
//!
//! Every mutation targets the top-most layer: the innermost open
//! transaction's overlay, or the base store when none is open. Every read
//! scans overlays from innermost to outermost; the first overlay with any
//! record for the key decides the result, otherwise the base store does.
//!
//! ## Lifecycle
//!
//! ```text
//! begin()     push an empty overlay                 depth + 1
//! commit()    pop, merge records into new top       depth - 1
//!             (or into the base store at depth 0)
//! rollback()  pop, drop                             depth - 1
//! ```
//!
//! Commit and rollback on an empty stack change nothing and report
//! failure: `false` from the boolean forms, `Error::NoActiveTransaction`
//! from the `try_` forms.
//!
//! ## Merge
//!
//! A committing overlay hands each record, unchanged, to the layer below.
//! Into a parent overlay a tombstone stays a tombstone so it keeps hiding
//! whatever the lower layers hold. Into the base store a tombstone erases
//! the key. Records for distinct keys are independent, so merge order is
//! irrelevant.

use std::collections::BTreeMap;

use layerkv_core::{Error, Key, KvRead, Lookup, Record, Result, StoreConfig, Value};
use layerkv_storage::{BaseStore, Overlay, PendingOperations};
use tracing::{debug, trace};

/// Result of committing one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyResult {
    /// Number of written values handed to the enclosing layer
    pub writes_applied: usize,
    /// Number of tombstones handed to the enclosing layer
    pub tombstones_applied: usize,
    /// Transaction depth after the commit (0 = merged into the base store)
    pub depth: usize,
}

impl ApplyResult {
    /// Total number of records applied
    pub fn total_operations(&self) -> usize {
        self.writes_applied + self.tombstones_applied
    }

    /// Returns true if the records landed in the base store
    pub fn reached_base(&self) -> bool {
        self.depth == 0
    }
}

/// In-process key-value store with nested transactions
///
/// Owns its base store and overlay stack exclusively. Independent
/// instances share nothing.
///
/// # Example
///
/// ```
/// use layerkv_concurrency::TransactionalStore;
///
/// let mut store = TransactionalStore::new();
/// store.set("a", "5");
///
/// store.begin();
/// store.set("a", "15");
/// assert_eq!(store.get("a").map(|v| v.as_str()), Some("15"));
/// assert!(store.rollback());
///
/// assert_eq!(store.get("a").map(|v| v.as_str()), Some("5"));
/// assert!(!store.commit());
/// ```
#[derive(Debug, Clone)]
pub struct TransactionalStore {
    base: BaseStore,
    /// Index 0 is the outermost open transaction
    overlays: Vec<Overlay>,
    /// Transaction ID of each open overlay, parallel to `overlays`
    txn_ids: Vec<u64>,
    /// Next transaction ID
    ///
    /// Monotonically increasing; IDs are never reused within one store.
    next_txn_id: u64,
    config: StoreConfig,
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalStore {
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        Self::from_parts(StoreConfig::default())
    }

    /// Create an empty store with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration fails validation.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: StoreConfig) -> Self {
        TransactionalStore {
            base: BaseStore::with_capacity(config.base_capacity),
            overlays: Vec::new(),
            txn_ids: Vec::new(),
            next_txn_id: 1,
            config,
        }
    }

    /// The configuration this store was built with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // === Mutations ===

    /// Set `key` to `value` in the current scope
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        trace!(store = %self.config.label, key = %key, depth = self.depth(), "set");
        match self.overlays.last_mut() {
            Some(top) => top.record_write(key, value.into()),
            None => {
                self.base.put(key, value.into());
            }
        }
    }

    /// Delete `key` in the current scope
    ///
    /// Inside a transaction this records a tombstone that hides the key
    /// from every layer below. Outside one it erases the key from the base
    /// store.
    pub fn delete(&mut self, key: impl Into<Key>) {
        let key = key.into();
        trace!(store = %self.config.label, key = %key, depth = self.depth(), "delete");
        match self.overlays.last_mut() {
            Some(top) => top.record_tombstone(key),
            None => {
                self.base.remove(key.as_str());
            }
        }
    }

    // === Reads ===

    /// Get the value visible for `key`, or None if absent or deleted
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.lookup(key).value()
    }

    /// Resolve `key`, keeping deleted apart from absent
    ///
    /// Returns `Lookup::Deleted` only when a tombstone in an open
    /// transaction decided the result.
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        for overlay in self.overlays.iter().rev() {
            let found = overlay.lookup(key);
            if found.is_decided() {
                return found;
            }
        }
        self.base.get(key).into()
    }

    /// Returns true if a value is visible for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Materialize every visible key and value
    ///
    /// Starts from the base store and applies each overlay from outermost
    /// to innermost.
    pub fn snapshot(&self) -> BTreeMap<Key, Value> {
        let mut visible: BTreeMap<Key, Value> = self
            .base
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for overlay in &self.overlays {
            for (key, record) in overlay.iter() {
                match record {
                    Record::Written(v) => {
                        visible.insert(key.clone(), v.clone());
                    }
                    Record::Tombstoned => {
                        visible.remove(key.as_str());
                    }
                }
            }
        }
        visible
    }

    /// Read-only view of the base store
    ///
    /// This is what would be visible after rolling back every open
    /// transaction.
    pub fn committed(&self) -> &BaseStore {
        &self.base
    }

    // === Transactions ===

    /// Open a nested transaction, returning its ID
    pub fn begin(&mut self) -> u64 {
        let id = self.next_txn_id;
        self.next_txn_id += 1;
        self.overlays
            .push(Overlay::with_capacity(self.config.overlay_capacity));
        self.txn_ids.push(id);
        debug!(store = %self.config.label, depth = self.depth(), txn_id = id, "begin");
        id
    }

    /// Commit the innermost transaction
    ///
    /// Returns false, changing nothing, if no transaction is open.
    pub fn commit(&mut self) -> bool {
        self.try_commit().is_ok()
    }

    /// Commit the innermost transaction, reporting what was merged
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveTransaction` if no transaction is open.
    pub fn try_commit(&mut self) -> Result<ApplyResult> {
        let Some(top) = self.overlays.pop() else {
            debug!(store = %self.config.label, "commit with no active transaction");
            return Err(Error::NoActiveTransaction {
                operation: "commit",
            });
        };
        self.txn_ids.pop();

        let pending = top.pending();
        match self.overlays.last_mut() {
            Some(parent) => {
                for (key, record) in top.into_records() {
                    parent.record(key, record);
                }
            }
            None => {
                for (key, record) in top.into_records() {
                    self.base.apply(key, record);
                }
            }
        }

        let result = ApplyResult {
            writes_applied: pending.writes,
            tombstones_applied: pending.tombstones,
            depth: self.depth(),
        };
        debug!(
            store = %self.config.label,
            depth = result.depth,
            writes = result.writes_applied,
            tombstones = result.tombstones_applied,
            "commit"
        );
        Ok(result)
    }

    /// Roll back the innermost transaction
    ///
    /// Returns false, changing nothing, if no transaction is open.
    pub fn rollback(&mut self) -> bool {
        self.try_rollback().is_ok()
    }

    /// Roll back the innermost transaction, reporting what was discarded
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveTransaction` if no transaction is open.
    pub fn try_rollback(&mut self) -> Result<PendingOperations> {
        let Some(top) = self.overlays.pop() else {
            debug!(store = %self.config.label, "rollback with no active transaction");
            return Err(Error::NoActiveTransaction {
                operation: "rollback",
            });
        };
        self.txn_ids.pop();

        let discarded = top.pending();
        debug!(
            store = %self.config.label,
            depth = self.depth(),
            discarded = discarded.total(),
            "rollback"
        );
        Ok(discarded)
    }

    /// Roll back every open transaction, returning how many were discarded
    pub fn clear_transactions(&mut self) -> usize {
        self.rollback_to(0)
    }

    /// Roll back transactions until at most `depth` remain open
    ///
    /// Returns how many were discarded; 0 if already at or below `depth`.
    pub fn rollback_to(&mut self, depth: usize) -> usize {
        let count = self.overlays.len().saturating_sub(depth);
        if count > 0 {
            self.overlays.truncate(depth);
            self.txn_ids.truncate(depth);
            debug!(
                store = %self.config.label,
                depth = self.depth(),
                discarded = count,
                "rolled back transactions"
            );
        }
        count
    }

    /// ID of the innermost open transaction
    ///
    /// Each `begin` is assigned a fresh ID, so two transactions opened at
    /// the same depth are still told apart.
    pub fn transaction_id(&self) -> Option<u64> {
        self.txn_ids.last().copied()
    }

    /// Number of open transactions begun after transaction `id`
    ///
    /// These are always the innermost ones.
    pub fn transactions_since(&self, id: u64) -> usize {
        self.txn_ids.iter().rev().take_while(|&&t| t > id).count()
    }

    /// Number of open transactions
    pub fn depth(&self) -> usize {
        self.overlays.len()
    }

    /// Returns true if at least one transaction is open
    pub fn in_transaction(&self) -> bool {
        !self.overlays.is_empty()
    }

    /// Summary of the innermost transaction's pending records
    pub fn pending(&self) -> Option<PendingOperations> {
        self.overlays.last().map(Overlay::pending)
    }
}

impl KvRead for TransactionalStore {
    fn get(&self, key: &str) -> Option<&Value> {
        TransactionalStore::get(self, key)
    }
}

//! Overlay: one transaction's pending-change layer
//!
//! An overlay maps each key it has touched to a [`Record`]. Keys it has not
//! touched are missing from the map, which means "defer to the layer
//! below". At most one record exists per key; a later write or delete of
//! the same key replaces the earlier record.
//!
//! # Delete semantics
//!
//! `record_tombstone` always stores `Record::Tombstoned`. It never just
//! drops the key's entry: a dropped entry would let a value recorded by an
//! enclosing layer show through again.

use layerkv_core::{Key, Lookup, Record, Value};
use rustc_hash::FxHashMap;

/// Summary of the records held by an overlay
///
/// Shows what would be merged on commit or discarded on rollback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingOperations {
    /// Number of pending writes
    pub writes: usize,
    /// Number of pending tombstones
    pub tombstones: usize,
}

impl PendingOperations {
    /// Total number of pending records
    pub fn total(&self) -> usize {
        self.writes + self.tombstones
    }

    /// Check if there are no pending records
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Pending writes and tombstones of one open transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    records: FxHashMap<Key, Record>,
}

impl Overlay {
    /// Create a new empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an overlay with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Record that `key` was set to `value`
    pub fn record_write(&mut self, key: Key, value: Value) {
        self.records.insert(key, Record::Written(value));
    }

    /// Record that `key` was deleted
    pub fn record_tombstone(&mut self, key: Key) {
        self.records.insert(key, Record::Tombstoned);
    }

    /// Store an arbitrary record, replacing any earlier one for `key`
    ///
    /// Used when merging a committed inner overlay into this one.
    pub fn record(&mut self, key: Key, record: Record) {
        self.records.insert(key, record);
    }

    /// Resolve `key` against this overlay alone
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        match self.records.get(key) {
            Some(record) => record.as_lookup(),
            None => Lookup::Absent,
        }
    }

    /// Number of keys this overlay mentions
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if this overlay mentions no keys
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count pending writes and tombstones
    pub fn pending(&self) -> PendingOperations {
        let tombstones = self.records.values().filter(|r| r.is_tombstone()).count();
        PendingOperations {
            writes: self.records.len() - tombstones,
            tombstones,
        }
    }

    /// Iterate over all records in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Record)> {
        self.records.iter()
    }

    /// Consume the overlay, yielding its records in unspecified order
    pub fn into_records(self) -> impl Iterator<Item = (Key, Record)> {
        self.records.into_iter()
    }
}

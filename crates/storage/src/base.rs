//! BaseStore: the committed key → value mapping
//!
//! Visible when no transaction is open. Mutated directly by set/delete at
//! depth 0, or by a depth-1 commit applying its records.

use layerkv_core::{Key, KvRead, Record, Value};
use rustc_hash::FxHashMap;

/// Committed storage, one value per key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseStore {
    data: FxHashMap<Key, Value>,
}

impl BaseStore {
    /// Create a new empty BaseStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a BaseStore with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Get the value stored for `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Store `value` under `key`, returning the previous value
    pub fn put(&mut self, key: Key, value: Value) -> Option<Value> {
        self.data.insert(key, value)
    }

    /// Erase `key`, returning the value it held
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Apply a record from a committing overlay
    ///
    /// `Written` stores the value; `Tombstoned` erases the key.
    pub fn apply(&mut self, key: Key, record: Record) {
        match record {
            Record::Written(value) => {
                self.data.insert(key, value);
            }
            Record::Tombstoned => {
                self.data.remove(key.as_str());
            }
        }
    }

    /// Number of keys present
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no keys are present
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.data.iter()
    }
}

impl KvRead for BaseStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

impl FromIterator<(Key, Value)> for BaseStore {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

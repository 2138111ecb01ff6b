//! Core traits for layer abstraction
//!
//! `KvRead` is the read-only view shared by the base store and the full
//! transactional store. Callers that only read can take `&impl KvRead` and
//! stay agnostic of which layer they are looking at.

use crate::types::Value;

/// Read-only key-value view
pub trait KvRead {
    /// Get the visible value for `key`
    ///
    /// Returns None if the key is absent or deleted.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Returns true if a value is visible for `key`
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

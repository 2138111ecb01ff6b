//! Core types for LayerKV
//!
//! This module defines the two opaque text types:
//! - Key: identifier a value is stored under
//! - Value: stored content
//!
//! Both are thin wrappers around `String`. Neither carries any reserved
//! words, so any text is a legal key or value.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque text key
///
/// `Key` implements `Borrow<str>`, so maps keyed by `Key` can be queried
/// with a plain `&str` without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Create a key from anything convertible to a `String`
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque text value
///
/// Values are never inspected by the store. Text that happens to read
/// like a marker (`"NULL"`, `"__DELETED__"`) is an ordinary value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    /// Create a value from anything convertible to a `String`
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the value as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the value, returning the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Tagged records and lookup results
//!
//! Overlays never store sentinel text. Each key an overlay mentions maps to
//! a [`Record`]; keys it does not mention are simply missing from its map.
//! Reads report a [`Lookup`], which keeps "deleted here" apart from "never
//! mentioned".

use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Write record held by a pending-change layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    /// The key was set to this value within the layer
    Written(Value),
    /// The key was explicitly deleted within the layer
    Tombstoned,
}

impl Record {
    /// Returns true if this record is a tombstone
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Record::Tombstoned)
    }

    /// The written value, or None for a tombstone
    pub fn value(&self) -> Option<&Value> {
        match self {
            Record::Written(v) => Some(v),
            Record::Tombstoned => None,
        }
    }

    /// Borrowing view of this record as a lookup result
    pub fn as_lookup(&self) -> Lookup<'_> {
        match self {
            Record::Written(v) => Lookup::Found(v),
            Record::Tombstoned => Lookup::Deleted,
        }
    }
}

impl From<Value> for Record {
    fn from(v: Value) -> Self {
        Record::Written(v)
    }
}

/// Resolution of a key against a layer or a whole store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A live value is visible
    Found(&'a Value),
    /// A tombstone decided the result; nothing is visible
    Deleted,
    /// Nothing is recorded for the key
    Absent,
}

impl<'a> Lookup<'a> {
    /// Collapse to the visible value, if any
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Deleted | Lookup::Absent => None,
        }
    }

    /// Returns true if a live value is visible
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Returns true if the layer had any record for the key
    ///
    /// A decided lookup stops a top-down scan; an absent one defers to the
    /// layer below.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Lookup::Absent)
    }
}

impl<'a> From<Option<&'a Value>> for Lookup<'a> {
    fn from(v: Option<&'a Value>) -> Self {
        match v {
            Some(v) => Lookup::Found(v),
            None => Lookup::Absent,
        }
    }
}

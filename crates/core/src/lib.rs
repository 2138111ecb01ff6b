//! Core types and traits for LayerKV
//!
//! This crate defines the foundational types used throughout the system:
//! - Key / Value: opaque text newtypes
//! - Record: tagged write record held by an overlay (written or tombstoned)
//! - Lookup: three-way resolution of a key (found, deleted, absent)
//! - Error: Error type hierarchy
//! - StoreConfig: construction-time options
//! - Traits: read-only view shared by every layer (KvRead)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use record::{Lookup, Record};
pub use traits::KvRead;
pub use types::{Key, Value};

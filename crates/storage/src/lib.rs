//! Storage layer for LayerKV
//!
//! This crate implements the two kinds of layer a transactional store is
//! built from:
//! - BaseStore: the committed key → value mapping
//! - Overlay: one transaction's pending writes and tombstones
//!
//! Both use FxHashMap for O(1) lookups. Neither is synchronized; the
//! concurrency crate owns them and decides who may mutate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod base;
pub mod overlay;

pub use base::BaseStore;
pub use overlay::{Overlay, PendingOperations};

//! Store configuration
//!
//! Options fixed at construction time. Every field has a default, and
//! `#[serde(default)]` lets embedders load a partial config from their own
//! configuration files.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default label attached to log events
pub const DEFAULT_LABEL: &str = "layerkv";

/// Construction-time options for a transactional store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name recorded in the `store` field of every log event
    pub label: String,

    /// Initial capacity of the base store (default: 0)
    pub base_capacity: usize,

    /// Initial capacity of each overlay pushed by `begin` (default: 0)
    pub overlay_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            label: DEFAULT_LABEL.to_string(),
            base_capacity: 0,
            overlay_capacity: 0,
        }
    }
}

impl StoreConfig {
    /// Set the log label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the base store's initial capacity
    pub fn with_base_capacity(mut self, capacity: usize) -> Self {
        self.base_capacity = capacity;
        self
    }

    /// Set each overlay's initial capacity
    pub fn with_overlay_capacity(mut self, capacity: usize) -> Self {
        self.overlay_capacity = capacity;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the label is empty or whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

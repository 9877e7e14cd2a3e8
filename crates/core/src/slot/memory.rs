//! In-memory slot.

use std::collections::HashMap;

use super::{PersistentSlot, SlotError};

/// Slot backed by a `HashMap`. Contents live as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot with `value` already stored under `key`.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values, writes: 0 }
    }

    /// Raw stored document for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of successful `store` calls.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl PersistentSlot for MemorySlot {
    fn load(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

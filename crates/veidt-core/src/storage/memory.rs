//! In-memory slot

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueSlot, StorageResult};

/// Slot backed by a process-local map
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with a raw value (useful for testing
    /// how the store reacts to hand-written or corrupted state)
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.lock().insert(key.into(), value.into());
        slot
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds whole values; keep using it
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key() {
        let slot = MemorySlot::new();
        assert!(slot.read("missing").unwrap().is_none());
    }

    #[test]
    fn test_write_replaces_value() {
        let slot = MemorySlot::with_value("k", "first");
        slot.write("k", "second").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("second"));
    }
}

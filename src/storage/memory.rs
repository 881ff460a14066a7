//! In-memory blob store for tests.

use std::collections::HashMap;

use super::{BlobStore, Result};

/// Keeps blobs in a map and counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,

    /// Number of `set_item` calls so far.
    pub writes: usize,
}

impl MemoryStore {
    /// A store already holding `value` under `key`.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self { items, writes: 0 }
    }
}

impl BlobStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

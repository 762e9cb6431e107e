//! Process-local key-value store.

use hashbrown::HashMap;

use super::{KvStore, PersistResult};

/// In-memory [`KvStore`]; contents are lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    values: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

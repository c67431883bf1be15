use crate::store::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory store, used for tests and sessions without a data directory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.inner.read().map_err(|_| Self::poisoned())?;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Store HIT for key: {}", key);
        } else {
            debug!("Store MISS for key: {}", key);
        }
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        debug!("Store PUT for key: {}", key);
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

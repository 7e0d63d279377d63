use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::Persistence;
use crate::error::StorageError;

/// In-memory backend. Used when no storage directory is configured and in
/// tests.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl Persistence for MemoryPersistence {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

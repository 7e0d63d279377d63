use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::Persistence;

/// Counters for the silent-fallback paths of every [`KeyedStore`] sharing
/// them.
#[derive(Debug, Default)]
pub struct StorageStats {
    read_fallbacks: AtomicU64,
    write_failures: AtomicU64,
    skipped_records: AtomicU64,
}

impl StorageStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reads that returned the fallback because the stored value was
    /// malformed or the backend failed.
    pub fn read_fallbacks(&self) -> u64 {
        self.read_fallbacks.load(Ordering::Relaxed)
    }

    /// Writes or clears the backend refused.
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Stored entries that parsed as JSON but not as the collection's record
    /// type. They are left in storage untouched.
    pub fn skipped_records(&self) -> u64 {
        self.skipped_records.load(Ordering::Relaxed)
    }
}

/// A stored array split into decoded records and the raw entries that did
/// not decode.
#[derive(Debug, Clone)]
pub struct LoadedRecords<T> {
    pub records: Vec<T>,
    pub unreadable: Vec<Value>,
}

impl<T> LoadedRecords<T> {
    fn decoded(records: Vec<T>) -> Self {
        Self {
            records,
            unreadable: Vec::new(),
        }
    }
}

/// JSON view of a single storage key.
///
/// Nothing here returns an error: a failed read yields the caller's fallback
/// and a failed write is logged and counted.
#[derive(Clone)]
pub struct KeyedStore {
    backend: Arc<dyn Persistence>,
    key: String,
    stats: Arc<StorageStats>,
}

impl KeyedStore {
    pub fn new(backend: Arc<dyn Persistence>, key: impl Into<String>, stats: Arc<StorageStats>) -> Self {
        Self {
            backend,
            key: key.into(),
            stats,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn stats(&self) -> &Arc<StorageStats> {
        &self.stats
    }

    /// Load the stored value, or `fallback` when nothing is stored or the
    /// stored value cannot be read.
    pub fn load_or<T: DeserializeOwned>(&self, fallback: T) -> T {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(e) => {
                self.stats.read_fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(key = %self.key, error = %e, "Failed to read key, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                self.stats.read_fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(key = %self.key, error = %e, "Stored value is not valid JSON, using fallback");
                fallback
            }
        }
    }

    /// Serialize and store `value`. Returns whether the write landed.
    pub fn save<T: Serialize + ?Sized>(&self, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                self.stats.write_failures.fetch_add(1, Ordering::Relaxed);
                warn!(key = %self.key, error = %e, "Failed to serialize value");
                return false;
            }
        };

        match self.backend.write(&self.key, &raw) {
            Ok(()) => true,
            Err(e) => {
                self.stats.write_failures.fetch_add(1, Ordering::Relaxed);
                warn!(key = %self.key, error = %e, "Failed to save key");
                false
            }
        }
    }

    /// Return the stored array, writing `seed` first if the key holds nothing
    /// or holds text that is not JSON at all.
    ///
    /// A value that parses as JSON is never overwritten here. Array entries
    /// that do not decode as `T` are skipped and handed back in
    /// [`LoadedRecords::unreadable`] so [`Self::save_records`] can keep them.
    pub fn init_with_seed<T>(&self, seed: &[T]) -> LoadedRecords<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.write_seed(seed),
            Err(e) => {
                self.stats.read_fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(key = %self.key, error = %e, "Failed to read key, serving seed without writing");
                return LoadedRecords::decoded(seed.to_vec());
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                self.stats.read_fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(key = %self.key, "Stored value is not an array, leaving it in place");
                return LoadedRecords {
                    records: Vec::new(),
                    unreadable: vec![other],
                };
            }
            Err(e) => {
                self.stats.read_fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(key = %self.key, error = %e, "Stored value is not valid JSON, reseeding");
                return self.write_seed(seed);
            }
        };

        let mut loaded = LoadedRecords::decoded(Vec::with_capacity(entries.len()));
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<T>(entry.clone()) {
                Ok(record) => loaded.records.push(record),
                Err(e) => {
                    self.stats.skipped_records.fetch_add(1, Ordering::Relaxed);
                    warn!(key = %self.key, index, error = %e, "Skipping stored record that does not decode");
                    loaded.unreadable.push(entry);
                }
            }
        }
        loaded
    }

    fn write_seed<T>(&self, seed: &[T]) -> LoadedRecords<T>
    where
        T: Serialize + Clone,
    {
        debug!(key = %self.key, seed_len = seed.len(), "Seeding key");
        self.save(seed);
        LoadedRecords::decoded(seed.to_vec())
    }

    /// Store `records` followed by the entries an earlier load could not
    /// decode.
    pub fn save_records<T: Serialize>(&self, records: &[T], unreadable: &[Value]) -> bool {
        if unreadable.is_empty() {
            return self.save(records);
        }

        let mut entries = Vec::with_capacity(records.len() + unreadable.len());
        for record in records {
            match serde_json::to_value(record) {
                Ok(value) => entries.push(value),
                Err(e) => {
                    self.stats.write_failures.fetch_add(1, Ordering::Relaxed);
                    warn!(key = %self.key, error = %e, "Failed to serialize record");
                    return false;
                }
            }
        }
        entries.extend(unreadable.iter().cloned());
        self.save(&entries)
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(&self.key) {
            self.stats.write_failures.fetch_add(1, Ordering::Relaxed);
            warn!(key = %self.key, error = %e, "Failed to clear key");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPersistence;

    fn keyed(backend: Arc<MemoryPersistence>) -> KeyedStore {
        KeyedStore::new(backend, "brisk_test_v1", StorageStats::new())
    }

    #[test]
    fn test_missing_key_returns_fallback_without_counting() {
        let store = keyed(Arc::new(MemoryPersistence::new()));
        let value: Vec<u32> = store.load_or(vec![7]);
        assert_eq!(value, vec![7]);
        assert_eq!(store.stats().read_fallbacks(), 0);
    }

    #[test]
    fn test_malformed_json_falls_back_and_is_counted() {
        let backend = Arc::new(MemoryPersistence::new());
        backend.write("brisk_test_v1", "{not json").unwrap();
        let store = keyed(backend);

        let value: Vec<u32> = store.load_or(vec![1, 2]);
        assert_eq!(value, vec![1, 2]);
        assert_eq!(store.stats().read_fallbacks(), 1);
    }

    #[test]
    fn test_init_with_seed_only_seeds_once() {
        let backend = Arc::new(MemoryPersistence::new());
        let store = keyed(backend.clone());

        let first = store.init_with_seed(&[1u32, 2, 3]).records;
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(backend.read("brisk_test_v1").unwrap().as_deref(), Some("[1,2,3]"));

        store.save(&Vec::<u32>::new());
        let second = store.init_with_seed(&[1u32, 2, 3]).records;
        assert!(second.is_empty());
    }

    #[test]
    fn test_clear_then_init_reseeds() {
        let store = keyed(Arc::new(MemoryPersistence::new()));
        store.save(&vec![9u32]);
        store.clear();
        assert_eq!(store.init_with_seed(&[4u32]).records, vec![4]);
    }

    #[test]
    fn test_invalid_json_is_reseeded() {
        let backend = Arc::new(MemoryPersistence::new());
        backend.write("brisk_test_v1", "[1, 2").unwrap();
        let store = keyed(backend.clone());

        assert_eq!(store.init_with_seed(&[5u32]).records, vec![5]);
        assert_eq!(backend.read("brisk_test_v1").unwrap().as_deref(), Some("[5]"));
        assert_eq!(store.stats().read_fallbacks(), 1);
    }

    #[test]
    fn test_undecodable_entries_are_skipped_and_kept() {
        let backend = Arc::new(MemoryPersistence::new());
        backend.write("brisk_test_v1", r#"[1, "two", 3]"#).unwrap();
        let store = keyed(backend.clone());

        let loaded = store.init_with_seed(&[9u32]);
        assert_eq!(loaded.records, vec![1, 3]);
        assert_eq!(loaded.unreadable, vec![Value::from("two")]);
        assert_eq!(store.stats().skipped_records(), 1);
        assert_eq!(backend.read("brisk_test_v1").unwrap().as_deref(), Some(r#"[1, "two", 3]"#));

        assert!(store.save_records(&[1u32, 3, 4], &loaded.unreadable));
        assert_eq!(backend.read("brisk_test_v1").unwrap().as_deref(), Some(r#"[1,3,4,"two"]"#));
    }
}

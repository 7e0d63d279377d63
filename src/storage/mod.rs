//! Key/value persistence for collections.
//!
//! A [`Persistence`] backend stores raw strings under keys. JSON encoding and
//! the "never throw to the caller" fallback policy live in [`KeyedStore`],
//! which is constructed once per collection.

mod file;
mod keyed;
mod memory;

pub use file::FilePersistence;
pub use keyed::{KeyedStore, LoadedRecords, StorageStats};
pub use memory::MemoryPersistence;

use crate::error::StorageError;

/// Raw string storage. Implementations: in-memory map, one-file-per-key
/// directory.
pub trait Persistence: Send + Sync {
    /// Read the value under `key`. `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

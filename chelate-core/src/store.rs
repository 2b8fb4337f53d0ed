use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a store instance.
///
/// The change-event source fires for every key on every store; listeners use
/// the id to discard events from stores they are not bound to. Two handles
/// over the same underlying store must share one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(u64);

impl StoreId {
    /// Allocates a fresh id. Called once per store instance at construction.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        StoreId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store#{}", self.0)
    }
}

/// A string-keyed store of JSON text.
///
/// Stores operate on raw text — encoding/decoding is handled by higher layers
/// (StoreBinding, ValueController). A failed read folds into `None`; only
/// writes and removals carry an error, and no layer retries a failed write.
///
/// All methods take `&self` to support stores with internal locking (e.g., RocksDB).
pub trait TextStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Identity of this store instance, used to filter change events.
    fn id(&self) -> StoreId;

    /// Retrieves the text stored at a key, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores text at the given key.
    fn set(&self, key: &str, text: &str) -> Result<(), Self::Error>;

    /// Removes the entry at the given key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// An in-memory store backed by a HashMap.
///
/// Useful for testing and as a reference implementation.
#[derive(Debug)]
pub struct MemoryStore {
    id: StoreId,
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            id: StoreId::next(),
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStore for MemoryStore {
    type Error = Infallible;

    fn id(&self) -> StoreId {
        self.id
    }

    fn get(&self, key: &str) -> Option<String> {
        self.data.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, text: &str) -> Result<(), Self::Error> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_owned(), text.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.data.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get() {
        let store = MemoryStore::new();

        store.set("greeting", "\"hello\"").unwrap();
        let retrieved = store.get("greeting");

        assert_eq!(retrieved, Some("\"hello\"".to_owned()));
    }

    #[test]
    fn memory_store_get_missing() {
        let store = MemoryStore::new();

        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn memory_store_overwrite() {
        let store = MemoryStore::new();

        store.set("key", "1").unwrap();
        store.set("key", "2").unwrap();

        assert_eq!(store.get("key"), Some("2".to_owned()));
    }

    #[test]
    fn memory_store_remove() {
        let store = MemoryStore::new();

        store.set("key", "1").unwrap();
        store.remove("key").unwrap();

        assert_eq!(store.get("key"), None);

        // Removing again is a no-op.
        store.remove("key").unwrap();
    }

    #[test]
    fn store_ids_are_distinct() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.id());
    }
}

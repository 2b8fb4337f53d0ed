//! RocksDB-backed text store for Chelate.

use std::path::Path;

use chelate_core::{StoreId, TextStore};
use rocksdb::{DB, Options};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("RocksDB error: {0}")]
pub struct RocksError(#[from] rocksdb::Error);

/// A persistent store backed by RocksDB.
///
/// Values are UTF-8 JSON text. Read failures and non-UTF-8 entries fold into
/// absent, per the `TextStore` contract; only writes and removals report
/// errors.
pub struct RocksStore {
    db: DB,
    id: StoreId,
}

impl RocksStore {
    /// Opens a RocksDB store at the given path.
    ///
    /// Creates the database if it doesn't exist. Each opened handle gets a
    /// fresh store identity; share the handle (not the path) to share the
    /// identity.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RocksError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self {
            db,
            id: StoreId::next(),
        })
    }
}

impl TextStore for RocksStore {
    type Error = RocksError;

    fn id(&self) -> StoreId {
        self.id
    }

    fn get(&self, key: &str) -> Option<String> {
        let bytes = self.db.get(key.as_bytes()).ok().flatten()?;
        String::from_utf8(bytes).ok()
    }

    fn set(&self, key: &str, text: &str) -> Result<(), Self::Error> {
        self.db.put(key.as_bytes(), text.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.db.delete(key.as_bytes())?;
        Ok(())
    }
}

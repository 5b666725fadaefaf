//! The on-disk half of the cache: a single `<cache_dir>/cache.redb` file
//! with one table per snapshot layer. Values are bincode-encoded
//! [`CachedEntry`] records stamped with the format version.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, Table, TableDefinition, WriteTransaction};

use super::key::CacheKey;
use super::snapshot::{
    CACHE_FORMAT_VERSION, CacheMetadata, CachedEntry, CachedEntryRef, SnapshotRef,
};

type Layer = TableDefinition<'static, &'static str, &'static [u8]>;

const GRAPHS: Layer = TableDefinition::new("graphs");
const RECIPES: Layer = TableDefinition::new("recipes");

const DB_FILE: &str = "cache.redb";

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("no cache entry for this key")]
    CacheMiss,

    #[error("cache database: {0}")]
    Database(String),

    #[error("failed to encode cache entry: {0}")]
    Encode(String),

    /// Bytes under the key are not a cache entry at all.
    #[error("failed to decode cache entry: {0}")]
    Decode(String),

    #[error("cache directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry has format version {found}, this build reads {expected}")]
    VersionMismatch { expected: u32, found: u32 },

    /// Entry decoded but holds the wrong kind of snapshot.
    #[error("malformed cache snapshot: expected {expected}, found {found}")]
    InvalidShape {
        expected: &'static str,
        found: &'static str,
    },

    /// Entry decoded but its contents are inconsistent.
    #[error("corrupted cache snapshot: {0}")]
    Corrupted(String),
}

macro_rules! database_errors {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CacheError {
                fn from(err: $ty) -> Self {
                    CacheError::Database(err.to_string())
                }
            }
        )*
    };
}

database_errors!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError,
);

/// Which snapshot layer a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTable {
    Graphs,
    Recipes,
}

impl CacheTable {
    pub const ALL: [CacheTable; 2] = [CacheTable::Graphs, CacheTable::Recipes];

    fn layer(self) -> Layer {
        match self {
            CacheTable::Graphs => GRAPHS,
            CacheTable::Recipes => RECIPES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CacheTable::Graphs => "graphs",
            CacheTable::Recipes => "recipes",
        }
    }
}

pub struct CacheStore {
    db: Database,
}

impl CacheStore {
    /// Open the store under `cache_dir`, creating the directory, the file and
    /// both tables on first use.
    pub fn open(cache_dir: &Path) -> Result<Self, CacheError> {
        std::fs::create_dir_all(cache_dir)?;
        let store = Self {
            db: Database::create(cache_dir.join(DB_FILE))?,
        };
        store.write(|txn| {
            for table in CacheTable::ALL {
                txn.open_table(table.layer())?;
            }
            Ok(())
        })?;
        Ok(store)
    }

    /// Run `f` inside a write transaction and commit if it succeeds.
    fn write<R>(
        &self,
        f: impl FnOnce(&WriteTransaction) -> Result<R, CacheError>,
    ) -> Result<R, CacheError> {
        let txn = self.db.begin_write()?;
        let out = f(&txn)?;
        txn.commit()?;
        Ok(out)
    }

    fn write_table<R>(
        &self,
        table: CacheTable,
        f: impl FnOnce(&mut Table<'_, &'static str, &'static [u8]>) -> Result<R, CacheError>,
    ) -> Result<R, CacheError> {
        self.write(|txn| {
            let mut handle = txn.open_table(table.layer())?;
            f(&mut handle)
        })
    }

    /// Decode the entry under `key`, or [`CacheError::CacheMiss`].
    pub fn get(&self, table: CacheTable, key: &CacheKey) -> Result<CachedEntry, CacheError> {
        let txn = self.db.begin_read()?;
        let handle = txn.open_table(table.layer())?;
        let value = handle.get(key.as_str())?.ok_or(CacheError::CacheMiss)?;

        let entry: CachedEntry =
            bincode::deserialize(value.value()).map_err(|e| CacheError::Decode(e.to_string()))?;
        if !entry.metadata.is_compatible() {
            return Err(CacheError::VersionMismatch {
                expected: CACHE_FORMAT_VERSION,
                found: entry.metadata.format_version,
            });
        }
        Ok(entry)
    }

    /// Store `snapshot` under `key`, replacing any previous entry.
    pub fn put(
        &self,
        table: CacheTable,
        key: &CacheKey,
        snapshot: SnapshotRef<'_>,
    ) -> Result<(), CacheError> {
        let entry = CachedEntryRef {
            metadata: CacheMetadata::new(),
            snapshot,
        };
        let bytes = bincode::serialize(&entry).map_err(|e| CacheError::Encode(e.to_string()))?;
        self.put_bytes(table, key, &bytes)
    }

    fn put_bytes(&self, table: CacheTable, key: &CacheKey, bytes: &[u8]) -> Result<(), CacheError> {
        self.write_table(table, |handle| {
            handle.insert(key.as_str(), bytes)?;
            Ok(())
        })
    }

    /// Returns whether an entry existed.
    pub fn remove(&self, table: CacheTable, key: &CacheKey) -> Result<bool, CacheError> {
        self.write_table(table, |handle| Ok(handle.remove(key.as_str())?.is_some()))
    }

    pub fn contains(&self, table: CacheTable, key: &CacheKey) -> Result<bool, CacheError> {
        let txn = self.db.begin_read()?;
        let handle = txn.open_table(table.layer())?;
        Ok(handle.get(key.as_str())?.is_some())
    }

    /// Keys of `table` in ascending order.
    pub fn keys(&self, table: CacheTable) -> Result<Vec<CacheKey>, CacheError> {
        let txn = self.db.begin_read()?;
        let handle = txn.open_table(table.layer())?;
        handle
            .iter()?
            .map(|item| Ok(CacheKey::from_raw(item?.0.value())))
            .collect()
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.write(|txn| {
            for table in CacheTable::ALL {
                txn.delete_table(table.layer())?;
                txn.open_table(table.layer())?;
            }
            Ok(())
        })
    }
}

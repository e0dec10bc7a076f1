//! LMDB key-value backend using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded key-value store: no external server required. All
//! operations are synchronous memory-mapped I/O, which matches the
//! synchronous [`KeyValueStore`] contract directly.
//!
//! # Databases (named LMDB sub-databases)
//!
//! - `values`: string keys to string values
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::core::error::StorageError;
use crate::core::store::KeyValueStore;
use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

const BACKEND: &str = "lmdb";

/// LMDB-backed implementation of [`KeyValueStore`].
///
/// The `Env` is wrapped in an `Arc` for cheap cloning.
///
/// # Example
///
/// ```rust,ignore
/// use catalog::storage::LmdbKeyValueStore;
///
/// let store = LmdbKeyValueStore::open("/tmp/catalog-lmdb")?;
/// let favorites = Favorites::load(Arc::new(store));
/// ```
#[derive(Clone)]
pub struct LmdbKeyValueStore {
    env: Arc<Env>,
    db: Database<Str, Str>,
}

impl LmdbKeyValueStore {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `values` named database.
    ///
    /// Favorites lists are tiny, so the map size stays small; LMDB only
    /// reserves address space for it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let unavailable = |e: &dyn std::fmt::Display| StorageError::Unavailable {
            backend: BACKEND,
            message: e.to_string(),
        };

        std::fs::create_dir_all(path.as_ref()).map_err(|e| unavailable(&e))?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(16 * 1024 * 1024)
                .max_dbs(4)
                .open(path.as_ref())
                .map_err(|e| unavailable(&e))?
        };

        let mut wtxn = env.write_txn().map_err(|e| unavailable(&e))?;
        let db: Database<Str, Str> = env
            .create_database(&mut wtxn, Some("values"))
            .map_err(|e| unavailable(&e))?;
        wtxn.commit().map_err(|e| unavailable(&e))?;

        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

impl KeyValueStore for LmdbKeyValueStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let read_err = |e: heed::Error| StorageError::Read {
            backend: BACKEND,
            key: key.to_string(),
            message: e.to_string(),
        };

        let rtxn = self.env.read_txn().map_err(read_err)?;
        let value = self.db.get(&rtxn, key).map_err(read_err)?;

        Ok(value.map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |e: heed::Error| StorageError::Write {
            backend: BACKEND,
            key: key.to_string(),
            message: e.to_string(),
        };

        let mut wtxn = self.env.write_txn().map_err(write_err)?;
        self.db.put(&mut wtxn, key, value).map_err(write_err)?;
        wtxn.commit().map_err(write_err)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let write_err = |e: heed::Error| StorageError::Write {
            backend: BACKEND,
            key: key.to_string(),
            message: e.to_string(),
        };

        let mut wtxn = self.env.write_txn().map_err(write_err)?;
        self.db.delete(&mut wtxn, key).map_err(write_err)?;
        wtxn.commit().map_err(write_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = LmdbKeyValueStore::open(dir.path()).unwrap();
            store.set("favorites", "[\"itm_003\"]").unwrap();
        }

        let store = LmdbKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("favorites").unwrap().as_deref(),
            Some("[\"itm_003\"]")
        );
    }
}

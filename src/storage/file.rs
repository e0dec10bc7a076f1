//! File-backed key-value store
//!
//! Each key is stored as its own file inside a directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves either the old value or the new one.

use crate::core::error::StorageError;
use crate::core::store::KeyValueStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const BACKEND: &str = "file";

/// Directory of one-file-per-key values
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Use `dir` as the storage directory, creating it if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable {
            backend: BACKEND,
            message: format!("cannot create {}: {}", dir.display(), e),
        })?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`, percent-encoded so distinct keys never share a file
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                backend: BACKEND,
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let write_err = |e: std::io::Error| StorageError::Write {
            backend: BACKEND,
            key: key.to_string(),
            message: e.to_string(),
        };

        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write {
                backend: BACKEND,
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

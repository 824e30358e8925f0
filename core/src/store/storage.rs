//! Key-value storage backends for the persisted cart.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use directories::ProjectDirs;
use tempfile::NamedTempFile;
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORGANISATION: &str = "DigitalBookstore";
const APP_NAME: &str = "digital-bookstore";

/// Failure modes of the storage boundary. The cart store absorbs both; they
/// never propagate past it.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(#[source] io::Error),
    #[error("storage write failed: {0}")]
    Write(#[source] io::Error),
}

/// Result of a raw storage operation.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Get/set-by-key semantics required of a cart persistence backend.
pub trait Storage {
    /// Fetch the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// File-per-key storage rooted at a directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at the platform data directory for this application.
    pub fn open_default() -> crate::Result<Self> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANISATION, APP_NAME)
            .ok_or_else(|| anyhow!("unable to resolve application data directory"))?;
        Self::open(dirs.data_dir().join("state"))
    }

    /// Storage rooted at an explicit directory, created if missing.
    pub fn open(dir: impl Into<PathBuf>) -> crate::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        write_atomic(&self.key_path(key), value.as_bytes()).map_err(StorageError::Write)
    }
}

/// Write through a temp file in the target directory so a torn write never
/// replaces a previously good value.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent =
        path.parent().ok_or_else(|| io::Error::other("storage path has no parent directory"))?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(data)?;
    temp.flush()?;

    match temp.persist(path) {
        Ok(_) => Ok(()),
        // Windows refuses to rename over an existing file; replace it explicitly.
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(remove_err) if remove_err.kind() == io::ErrorKind::NotFound => {}
                Err(remove_err) => return Err(remove_err),
            }
            err.file.persist(path).map(|_| ()).map_err(|persist_err| persist_err.error)
        }
        Err(err) => Err(err.error),
    }
}

/// In-memory backend for tests and shells that opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

use std::fs;
use std::io;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a storage operation failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] io::Error),
    #[error("storage format: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent key/value storage for settings. Callers treat both reads
/// and writes as best-effort.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// Flat JSON object on disk, one member per key. The whole document is
/// rewritten on every set, which stays cheap at five small keys.
pub struct FileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FileStore {
    /// Opens the store at `path`, treating a missing file as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<FileStore, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(FileStore { path, values })
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.clone());
        self.flush()
    }
}

/// In-memory store for tests and ephemeral runs, with switches to fault
/// either direction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, Value>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub write_count: usize,
}

impl MemoryStore {
    pub fn failing() -> MemoryStore {
        MemoryStore {
            fail_reads: true,
            fail_writes: true,
            ..MemoryStore::default()
        }
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn stored(&self, key: &str) -> Option<&Value> { self.values.get(key) }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Io(io::Error::other("read fault injected")));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.write_count += 1;
        if self.fail_writes {
            return Err(StoreError::Io(io::Error::other("write fault injected")));
        }
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

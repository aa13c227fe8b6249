//! Key-Value Backend
//!
//! The persistence seam: stores speak to an injected `KvBackend` holding
//! one JSON document per logical key. Two implementations ship: an
//! in-memory map and a file-per-key backend under the app directory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// String key-value persistence contract
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Get the value for a key; `None` when the key is absent
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set the value for a key, replacing any existing value
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key; absent keys are not an error
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Shared handle to a key-value backend
pub type SharedKv = Arc<dyn KvBackend>;

/// In-memory backend for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryKvBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvBackend for MemoryKvBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// File-backed backend: one JSON document per key in a flat directory
pub struct FileKvBackend {
    dir: PathBuf,
}

impl FileKvBackend {
    /// Create a backend rooted at the given directory, creating it if
    /// necessary
    pub fn new(dir: PathBuf) -> AppResult<Self> {
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; anything else is flattened so a
        // key can never escape the storage directory.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

#[async_trait]
impl KvBackend for FileKvBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AppError::storage(format!("Failed to read {}: {}", key, e)))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        std::fs::write(self.path_for(key), value)
            .map_err(|e| AppError::storage(format!("Failed to write {}: {}", key, e)))
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&path)
            .map_err(|e| AppError::storage(format!("Failed to remove {}: {}", key, e)))
    }
}

//! Cross-Platform Path Utilities
//!
//! Functions for resolving the application data directories.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Promptify directory (~/.promptify/)
pub fn promptify_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".promptify"))
}

/// Get the key-value storage directory (~/.promptify/storage/)
pub fn storage_dir() -> AppResult<PathBuf> {
    Ok(promptify_dir()?.join("storage"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .map_err(|e| AppError::storage(format!("Failed to create {}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// Get the storage directory, creating if it doesn't exist
pub fn ensure_storage_dir() -> AppResult<PathBuf> {
    let path = storage_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

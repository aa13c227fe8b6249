//! Settings Store
//!
//! Application configuration under a single key-value entry, with
//! partial-update merge semantics.

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::storage::{SharedKv, SETTINGS_KEY};
use crate::utils::error::{AppError, AppResult};

/// Store for the persisted application configuration
#[derive(Clone)]
pub struct SettingsStore {
    kv: SharedKv,
}

impl SettingsStore {
    pub fn new(kv: SharedKv) -> Self {
        Self { kv }
    }

    /// Get the stored configuration; defaults when nothing is stored yet.
    pub async fn get(&self) -> AppResult<AppConfig> {
        match self.kv.get(SETTINGS_KEY).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| AppError::storage(format!("Failed to parse settings: {}", e))),
            None => Ok(AppConfig::default()),
        }
    }

    /// Apply a partial update over the stored configuration, validate the
    /// result, and persist it.
    pub async fn update(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut config = self.get().await?;
        config.apply_update(update);
        config.validate().map_err(AppError::validation)?;
        self.write(&config).await?;
        Ok(config)
    }

    /// Reset the configuration to defaults.
    pub async fn reset(&self) -> AppResult<AppConfig> {
        let config = AppConfig::default();
        self.write(&config).await?;
        Ok(config)
    }

    async fn write(&self, config: &AppConfig) -> AppResult<()> {
        let json = serde_json::to_string(config)
            .map_err(|e| AppError::storage(format!("Failed to serialize settings: {}", e)))?;
        self.kv.set(SETTINGS_KEY, &json).await
    }
}

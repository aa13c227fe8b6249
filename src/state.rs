//! Application State
//!
//! Composition root wiring the key-value backend, provider, and clipboard
//! into the stores and services the host shell calls into.

use std::sync::Arc;

use promptify_llm::{EnhanceProvider, OllamaProvider, ProviderConfig};

use crate::models::settings::AppConfig;
use crate::services::catalog::PresetCatalog;
use crate::services::clipboard::Clipboard;
use crate::services::enhance::EnhancementService;
use crate::services::transfer::TransferService;
use crate::storage::history::HistoryStore;
use crate::storage::kv::{FileKvBackend, SharedKv};
use crate::storage::presets::PresetStore;
use crate::storage::settings::SettingsStore;
use crate::utils::error::AppResult;
use crate::utils::paths::ensure_storage_dir;

/// Build the enhancement provider for the configured backend.
///
/// Only Ollama is implemented; any other configured provider falls back
/// to it, mirroring the settings validation which gates what can actually
/// be stored.
pub fn provider_from_config(config: &AppConfig) -> Arc<dyn EnhanceProvider> {
    Arc::new(OllamaProvider::new(ProviderConfig {
        base_url: config.ollama.url.clone(),
        model: config.ollama.model.clone(),
        timeout_secs: config.ollama.timeout_secs,
    }))
}

/// Application state holding all stores and services
pub struct AppState {
    presets: PresetStore,
    history: HistoryStore,
    settings: SettingsStore,
    catalog: PresetCatalog,
    transfer: TransferService,
    enhancer: EnhancementService,
}

impl AppState {
    /// Wire up state over an explicit backend, provider, and clipboard.
    pub fn new(
        kv: SharedKv,
        provider: Arc<dyn EnhanceProvider>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let presets = PresetStore::new(kv.clone());
        let history = HistoryStore::new(kv.clone());
        let settings = SettingsStore::new(kv);
        let catalog = PresetCatalog::new(presets.clone());
        let transfer = TransferService::new(presets.clone(), catalog.clone());
        let enhancer = EnhancementService::new(
            catalog.clone(),
            history.clone(),
            settings.clone(),
            provider,
            clipboard,
        );

        Self {
            presets,
            history,
            settings,
            catalog,
            transfer,
            enhancer,
        }
    }

    /// Open state against the default on-disk backend, building the
    /// provider from persisted settings.
    pub async fn open_default(clipboard: Arc<dyn Clipboard>) -> AppResult<Self> {
        let kv: SharedKv = Arc::new(FileKvBackend::new(ensure_storage_dir()?)?);
        let settings = SettingsStore::new(kv.clone());
        let config = settings.get().await?;
        let provider = provider_from_config(&config);
        Ok(Self::new(kv, provider, clipboard))
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn transfer(&self) -> &TransferService {
        &self.transfer
    }

    pub fn enhancer(&self) -> &EnhancementService {
        &self.enhancer
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}

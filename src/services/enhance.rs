//! Enhancement Service
//!
//! The preset-use flow: clipboard text in, enhanced prompt out. Input is
//! sanitized and length-checked, the preset resolved through the catalog
//! (custom overrides win), its template rendered with the input, and the
//! provider called once with the finished prompt. No retries anywhere: a
//! failed call surfaces immediately.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::info;

use promptify_llm::EnhanceProvider;

use crate::models::enhancement::{EnhancementMetadata, EnhancementResult};
use crate::models::history::{HistoryMetadata, NewHistoryItem};
use crate::services::catalog::PresetCatalog;
use crate::services::clipboard::Clipboard;
use crate::services::template::{input_map, render};
use crate::services::validation::{sanitize_input, validate_input_text};
use crate::storage::history::HistoryStore;
use crate::storage::settings::SettingsStore;
use crate::utils::error::{AppError, AppResult};

/// Orchestrates a single enhancement round-trip
pub struct EnhancementService {
    catalog: PresetCatalog,
    history: HistoryStore,
    settings: SettingsStore,
    provider: Arc<dyn EnhanceProvider>,
    clipboard: Arc<dyn Clipboard>,
}

impl EnhancementService {
    pub fn new(
        catalog: PresetCatalog,
        history: HistoryStore,
        settings: SettingsStore,
        provider: Arc<dyn EnhanceProvider>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            catalog,
            history,
            settings,
            provider,
            clipboard,
        }
    }

    /// Enhance the current clipboard text with the given preset.
    pub async fn enhance_clipboard(&self, preset_id: &str) -> AppResult<EnhancementResult> {
        let text = self
            .clipboard
            .read_text()
            .await?
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::clipboard("No text found in clipboard. Copy some text and try again.")
            })?;
        self.enhance_text(&text, preset_id).await
    }

    /// Enhance the given text with the given preset.
    pub async fn enhance_text(&self, input: &str, preset_id: &str) -> AppResult<EnhancementResult> {
        let input = sanitize_input(input);

        let report = validate_input_text(&input);
        if !report.valid {
            return Err(AppError::validation(report.message()));
        }

        let preset = self
            .catalog
            .get_by_id(preset_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Preset not found: {}", preset_id)))?;

        let prompt = render(&preset.system_prompt, &input_map(&input));

        let started = Instant::now();
        let output = self.provider.enhance(&prompt).await?;
        let processing_time_ms = started.elapsed().as_millis() as u64;

        info!(
            preset = %preset.id,
            provider = self.provider.name(),
            processing_time_ms,
            "enhancement completed"
        );

        let metadata = EnhancementMetadata {
            provider: self.provider.name().to_string(),
            model: Some(self.provider.model().to_string()),
            processing_time_ms,
            timestamp: Utc::now().timestamp_millis(),
        };

        let config = self.settings.get().await?;

        if config.ui.save_to_history {
            self.history
                .save(
                    NewHistoryItem {
                        preset_id: preset.id.clone(),
                        input: input.clone(),
                        output: output.clone(),
                        metadata: HistoryMetadata {
                            provider: metadata.provider.clone(),
                            model: metadata.model.clone(),
                            processing_time_ms,
                        },
                    },
                    config.ui.max_history_items,
                )
                .await?;
        }

        if config.ui.auto_paste {
            self.clipboard.paste_text(&output).await?;
        }

        Ok(EnhancementResult {
            input,
            output,
            preset_id: preset.id,
            metadata,
        })
    }

    /// Whether the configured provider is reachable.
    pub async fn provider_available(&self) -> bool {
        self.provider.is_available().await
    }
}

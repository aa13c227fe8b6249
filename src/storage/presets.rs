//! Preset Store
//!
//! CRUD, capacity enforcement, and import/export for user-defined presets
//! over the injected key-value backend. The whole collection lives under
//! one logical key and every operation is a read-modify-write; the host
//! environment serializes command invocations, so no locking is done here.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::preset::{ExportBundle, ImportOptions, ImportReport, Preset, PresetDraft};
use crate::services::validation::{validate_preset, MAX_CUSTOM_PRESETS};
use crate::storage::{SharedKv, CUSTOM_PRESETS_KEY};
use crate::utils::error::{AppError, AppResult};

/// Version stamp written into bulk export envelopes
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn new_preset_id() -> String {
    format!("preset-{}", Uuid::new_v4())
}

/// Store for custom presets; built-in presets never pass through here
#[derive(Clone)]
pub struct PresetStore {
    kv: SharedKv,
}

impl PresetStore {
    pub fn new(kv: SharedKv) -> Self {
        Self { kv }
    }

    /// List all custom presets in stored order.
    ///
    /// An absent key is an empty collection; unparseable content is a
    /// storage error.
    pub async fn list(&self) -> AppResult<Vec<Preset>> {
        match self.kv.get(CUSTOM_PRESETS_KEY).await? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                AppError::storage(format!("Failed to parse custom presets: {}", e))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Insert or replace a preset by id.
    ///
    /// The candidate is validated first; `createdAt` is preserved for an
    /// existing id and assigned for a new one; `updatedAt` is always set
    /// and `isBuiltIn` is always forced off.
    pub async fn upsert(&self, preset: Preset) -> AppResult<Preset> {
        if preset.id.trim().is_empty() {
            return Err(AppError::validation("id is required"));
        }
        let report = validate_preset(&PresetDraft::from(&preset));
        if !report.valid {
            return Err(AppError::validation(report.message()));
        }

        let mut presets = self.list().await?;
        let now = now_millis();
        let existing_created_at = presets
            .iter()
            .find(|p| p.id == preset.id)
            .and_then(|p| p.created_at);

        let stored = Preset {
            is_built_in: false,
            created_at: preset.created_at.or(existing_created_at).or(Some(now)),
            updated_at: Some(now),
            ..preset
        };

        match presets.iter_mut().find(|p| p.id == stored.id) {
            Some(slot) => *slot = stored.clone(),
            None => presets.push(stored.clone()),
        }

        self.enforce_capacity(&mut presets);
        self.write(&presets).await?;
        debug!(id = %stored.id, "saved custom preset");
        Ok(stored)
    }

    /// Delete a preset by id; absent ids are not an error.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut presets = self.list().await?;
        presets.retain(|p| p.id != id);
        self.write(&presets).await
    }

    /// Remove the entire custom preset collection.
    pub async fn clear(&self) -> AppResult<()> {
        self.kv.remove(CUSTOM_PRESETS_KEY).await
    }

    /// Export one preset as pretty-printed JSON.
    pub async fn export_one(&self, id: &str) -> AppResult<String> {
        let presets = self.list().await?;
        let preset = presets
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Preset not found: {}", id)))?;

        if preset.name.trim().is_empty() || preset.system_prompt.trim().is_empty() {
            return Err(AppError::storage(
                "Invalid preset: missing name or systemPrompt",
            ));
        }

        serde_json::to_string_pretty(preset)
            .map_err(|e| AppError::storage(format!("Failed to serialize preset: {}", e)))
    }

    /// Export the whole collection wrapped in a versioned envelope.
    ///
    /// Fails on an empty collection and re-validates every member so a
    /// corrupt entry is caught before it spreads to another machine.
    pub async fn export_all(&self) -> AppResult<String> {
        let presets = self.list().await?;
        if presets.is_empty() {
            return Err(AppError::storage("No custom presets to export"));
        }

        for preset in &presets {
            if preset.name.trim().is_empty() || preset.system_prompt.trim().is_empty() {
                return Err(AppError::storage(format!(
                    "Invalid preset found: {}",
                    preset.id
                )));
            }
        }

        let bundle = ExportBundle {
            exported_at: Utc::now().to_rfc3339(),
            version: EXPORT_FORMAT_VERSION.to_string(),
            presets_count: presets.len(),
            presets,
        };

        serde_json::to_string_pretty(&bundle)
            .map_err(|e| AppError::storage(format!("Failed to serialize export: {}", e)))
    }

    /// Import a single preset from external JSON.
    ///
    /// On an id collision a fresh id is minted unless the caller asked to
    /// overwrite. A supplied `createdAt` is preserved; otherwise the
    /// preset is treated as newly created.
    pub async fn import_one(&self, json: &str, options: ImportOptions) -> AppResult<Preset> {
        let draft: PresetDraft = serde_json::from_str(json)
            .map_err(|e| AppError::storage(format!("Invalid preset JSON: {}", e)))?;
        self.import_draft(draft, options.overwrite).await
    }

    /// Import a bulk export envelope.
    ///
    /// With neither `merge` nor `overwrite` set the existing collection is
    /// replaced wholesale. Elements are imported independently; a failing
    /// element is recorded and skipped, never aborting the rest.
    pub async fn import_many(&self, json: &str, options: ImportOptions) -> AppResult<ImportReport> {
        let parsed: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| AppError::storage(format!("Invalid export JSON: {}", e)))?;

        let items = parsed
            .get("presets")
            .and_then(|v| v.as_array())
            .cloned()
            .ok_or_else(|| AppError::storage("Invalid export format: missing presets array"))?;

        if !options.merge && !options.overwrite {
            self.clear().await?;
        }

        let mut report = ImportReport::default();
        for item in items {
            let name_hint = item
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or("unknown")
                .to_string();

            let outcome = match serde_json::from_value::<PresetDraft>(item) {
                Ok(draft) => self.import_draft(draft, options.overwrite).await,
                Err(e) => Err(AppError::storage(format!("Invalid preset JSON: {}", e))),
            };

            match outcome {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    report
                        .errors
                        .push(format!("Failed to import preset \"{}\": {}", name_hint, e));
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }

    /// Validate an untrusted draft and commit it into the collection.
    pub(crate) async fn import_draft(
        &self,
        draft: PresetDraft,
        overwrite: bool,
    ) -> AppResult<Preset> {
        let report = validate_preset(&draft);
        if !report.valid {
            return Err(AppError::validation(report.message()));
        }

        let mut presets = self.list().await?;

        let mut id = draft
            .id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(new_preset_id);
        if presets.iter().any(|p| p.id == id) && !overwrite {
            id = new_preset_id();
        }

        let now = now_millis();
        let preset = Preset {
            id,
            name: draft.name.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            system_prompt: draft.system_prompt.unwrap_or_default(),
            tags: draft.tags.unwrap_or_default(),
            is_built_in: false,
            examples: draft.examples.unwrap_or_default(),
            created_at: draft.created_at.or(Some(now)),
            updated_at: Some(now),
        };

        match presets.iter_mut().find(|p| p.id == preset.id) {
            Some(slot) => *slot = preset.clone(),
            None => presets.push(preset.clone()),
        }

        self.enforce_capacity(&mut presets);
        self.write(&presets).await?;
        Ok(preset)
    }

    /// Truncate the collection to the cap, keeping the most recently
    /// updated entries. Eviction is silent by design; the log line is the
    /// only trace.
    fn enforce_capacity(&self, presets: &mut Vec<Preset>) {
        if presets.len() <= MAX_CUSTOM_PRESETS {
            return;
        }
        presets.sort_by(|a, b| b.updated_at.unwrap_or(0).cmp(&a.updated_at.unwrap_or(0)));
        let evicted: Vec<String> = presets[MAX_CUSTOM_PRESETS..]
            .iter()
            .map(|p| p.id.clone())
            .collect();
        presets.truncate(MAX_CUSTOM_PRESETS);
        warn!(?evicted, "custom preset cap reached, evicting stalest entries");
    }

    async fn write(&self, presets: &[Preset]) -> AppResult<()> {
        let json = serde_json::to_string(presets)
            .map_err(|e| AppError::storage(format!("Failed to serialize custom presets: {}", e)))?;
        self.kv.set(CUSTOM_PRESETS_KEY, &json).await
    }
}

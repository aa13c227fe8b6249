//! Import/Export Pipeline
//!
//! Thin orchestration over the validator, store, and catalog that adds
//! conflict pre-detection for interactive imports: before committing, the
//! merged catalog is searched for an existing preset sharing the
//! candidate's id or name so the caller can choose how to resolve it.

use serde::Serialize;
use serde_json::Value;

use crate::models::preset::{ImportOptions, ImportReport, Preset};
use crate::services::catalog::PresetCatalog;
use crate::storage::presets::PresetStore;
use crate::utils::error::{AppError, AppResult};

/// How an import candidate collides with an existing catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictKind {
    Id,
    Name,
}

/// A detected collision between an import candidate and the catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportConflict {
    /// Name of the incoming preset (or "unknown")
    pub candidate_name: String,
    /// Id of the incoming preset, when it carries one
    pub candidate_id: Option<String>,
    /// The catalog entry it collides with
    pub existing_id: String,
    pub existing_name: String,
    pub kind: ConflictKind,
}

/// Result of scanning an import document before committing it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    /// Number of preset documents found in the input
    pub total: usize,
    pub conflicts: Vec<ImportConflict>,
}

/// Orchestrates preset import/export with conflict pre-detection
#[derive(Clone)]
pub struct TransferService {
    store: PresetStore,
    catalog: PresetCatalog,
}

impl TransferService {
    pub fn new(store: PresetStore, catalog: PresetCatalog) -> Self {
        Self { store, catalog }
    }

    /// Scan an import document (single preset or bulk envelope) and
    /// report collisions against the merged catalog.
    ///
    /// The caller decides between overwrite and create-new-id before
    /// invoking `import_preset` / `import_bundle`.
    pub async fn preview(&self, json: &str) -> AppResult<ImportPreview> {
        let parsed: Value = serde_json::from_str(json)
            .map_err(|e| AppError::storage(format!("Invalid import JSON: {}", e)))?;

        let candidates: Vec<&Value> = match parsed.get("presets").and_then(|v| v.as_array()) {
            Some(items) => items.iter().collect(),
            None => vec![&parsed],
        };

        let existing = self.catalog.get_all().await?;
        let mut conflicts = Vec::new();

        for candidate in &candidates {
            let candidate_id = candidate
                .get("id")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());
            let candidate_name = candidate
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();

            if let Some(hit) = find_conflict(&existing, candidate_id.as_deref(), &candidate_name) {
                conflicts.push(ImportConflict {
                    candidate_name,
                    candidate_id,
                    existing_id: hit.0.id.clone(),
                    existing_name: hit.0.name.clone(),
                    kind: hit.1,
                });
            }
        }

        Ok(ImportPreview {
            total: candidates.len(),
            conflicts,
        })
    }

    /// Import a single preset with the caller's chosen collision policy.
    pub async fn import_preset(&self, json: &str, overwrite: bool) -> AppResult<Preset> {
        self.store
            .import_one(
                json,
                ImportOptions {
                    overwrite,
                    merge: true,
                },
            )
            .await
    }

    /// Import a bulk envelope with the caller's chosen policy.
    pub async fn import_bundle(
        &self,
        json: &str,
        options: ImportOptions,
    ) -> AppResult<ImportReport> {
        self.store.import_many(json, options).await
    }

    /// Export one custom preset as portable JSON.
    pub async fn export_preset(&self, id: &str) -> AppResult<String> {
        self.store.export_one(id).await
    }

    /// Export all custom presets as a bulk envelope.
    pub async fn export_all(&self) -> AppResult<String> {
        self.store.export_all().await
    }
}

fn find_conflict<'a>(
    existing: &'a [Preset],
    candidate_id: Option<&str>,
    candidate_name: &str,
) -> Option<(&'a Preset, ConflictKind)> {
    if let Some(id) = candidate_id {
        if let Some(hit) = existing.iter().find(|p| p.id == id) {
            return Some((hit, ConflictKind::Id));
        }
    }
    let name = candidate_name.trim();
    existing
        .iter()
        .find(|p| p.name.trim() == name)
        .map(|hit| (hit, ConflictKind::Name))
}

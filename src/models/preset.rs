//! Preset Models
//!
//! Data structures for enhancement presets and their portable JSON form.
//! Field names are camelCase on the wire so exports stay interchangeable
//! with other frontends.

use serde::{Deserialize, Serialize};

/// A prompt enhancement preset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Template with `{{key}}` / `{{key|default}}` placeholders; the
    /// primary input arrives under the `input` key
    pub system_prompt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Built-in presets live in the fixed catalog table and are never
    /// persisted by the store
    #[serde(default)]
    pub is_built_in: bool,
    /// Documentation-only sample pairs, never executed
    #[serde(default)]
    pub examples: Vec<PresetExample>,
    /// Unix milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Unix milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Example input/output pair attached to a preset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetExample {
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub description: String,
}

/// Loosely-typed preset document as parsed from external JSON.
///
/// Imported files are untrusted: every field is optional here and the
/// validator decides what is actually usable before a `Preset` is built.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub examples: Option<Vec<PresetExample>>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl From<&Preset> for PresetDraft {
    fn from(preset: &Preset) -> Self {
        Self {
            id: Some(preset.id.clone()),
            name: Some(preset.name.clone()),
            description: Some(preset.description.clone()),
            system_prompt: Some(preset.system_prompt.clone()),
            tags: Some(preset.tags.clone()),
            examples: Some(preset.examples.clone()),
            created_at: preset.created_at,
            updated_at: preset.updated_at,
        }
    }
}

/// Bulk export envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    /// RFC 3339 export timestamp
    pub exported_at: String,
    pub version: String,
    pub presets_count: usize,
    pub presets: Vec<Preset>,
}

/// Options controlling a preset import
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Replace an existing preset when the imported id collides; when
    /// false a fresh id is minted instead
    pub overwrite: bool,
    /// Keep the existing collection; when false (and overwrite is also
    /// false) the import replaces the whole collection
    pub merge: bool,
}

/// Outcome of a bulk import; one entry failing never aborts the rest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

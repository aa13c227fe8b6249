//! Promptify - Prompt Enhancement Backend Library
//!
//! Backend engine for a clipboard-driven prompt enhancement extension:
//! - Preset templates with `{{key}}` / `{{key|default}}` placeholders
//! - Built-in + custom preset catalog with override semantics
//! - Import/export of presets with conflict detection
//! - Enhancement flow against a local LLM provider
//! - Storage layer over a pluggable key-value backend

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use models::enhancement::{EnhancementMetadata, EnhancementResult};
pub use models::history::{HistoryItem, HistoryMetadata, NewHistoryItem};
pub use models::preset::{
    ExportBundle, ImportOptions, ImportReport, Preset, PresetDraft, PresetExample,
};
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::catalog::PresetCatalog;
pub use services::clipboard::Clipboard;
pub use services::enhance::EnhancementService;
pub use services::template::{extract_placeholder_names, input_map, render};
pub use services::transfer::{ImportConflict, ImportPreview, TransferService};
pub use services::validation::{validate_preset, ValidationReport};
pub use state::{provider_from_config, AppState};
pub use storage::history::HistoryStore;
pub use storage::kv::{FileKvBackend, KvBackend, MemoryKvBackend, SharedKv};
pub use storage::presets::PresetStore;
pub use storage::settings::SettingsStore;
pub use utils::error::{AppError, AppResult};

// Re-export the provider crate surface
pub use promptify_llm::{EnhanceProvider, LlmError, LlmResult, OllamaProvider, ProviderConfig};

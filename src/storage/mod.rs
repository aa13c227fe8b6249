//! Storage Layer
//!
//! Handles all data persistence over the key-value backend: custom
//! presets, enhancement history, and application settings.

pub mod history;
pub mod kv;
pub mod presets;
pub mod settings;

pub use history::*;
pub use kv::*;
pub use presets::*;
pub use settings::*;

/// Logical storage keys; each holds one JSON document
pub const HISTORY_KEY: &str = "promptify.history";
pub const SETTINGS_KEY: &str = "promptify.settings";
pub const CUSTOM_PRESETS_KEY: &str = "promptify.presets.custom";

//! Enhancement Models
//!
//! Request/result shapes for the enhancement flow.

use serde::{Deserialize, Serialize};

/// Result of a completed enhancement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    pub input: String,
    pub output: String,
    pub preset_id: String,
    pub metadata: EnhancementMetadata,
}

/// Provider metadata for a completed enhancement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementMetadata {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub processing_time_ms: u64,
    /// Unix milliseconds
    pub timestamp: i64,
}

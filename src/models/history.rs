//! History Models
//!
//! Data structures for the enhancement history list.

use serde::{Deserialize, Serialize};

/// A stored enhancement result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    /// Unix milliseconds
    pub timestamp: i64,
    pub preset_id: String,
    pub input: String,
    pub output: String,
    pub metadata: HistoryMetadata,
}

/// Provider metadata recorded with each history item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMetadata {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub processing_time_ms: u64,
}

/// A history entry before the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewHistoryItem {
    pub preset_id: String,
    pub input: String,
    pub output: String,
    pub metadata: HistoryMetadata,
}

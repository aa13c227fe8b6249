//! History Store
//!
//! Persisted list of enhancement results, newest first, capped.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::history::{HistoryItem, NewHistoryItem};
use crate::services::validation::MAX_HISTORY_ITEMS;
use crate::storage::{SharedKv, HISTORY_KEY};
use crate::utils::error::{AppError, AppResult};

/// Store for the enhancement history collection
#[derive(Clone)]
pub struct HistoryStore {
    kv: SharedKv,
}

impl HistoryStore {
    pub fn new(kv: SharedKv) -> Self {
        Self { kv }
    }

    /// Prepend a new item and truncate to `max_items` (clamped to the
    /// hard ceiling). Returns the assigned id.
    pub async fn save(&self, item: NewHistoryItem, max_items: usize) -> AppResult<String> {
        let cap = max_items.clamp(1, MAX_HISTORY_ITEMS);

        let entry = HistoryItem {
            id: format!("hist-{}", Uuid::new_v4()),
            timestamp: Utc::now().timestamp_millis(),
            preset_id: item.preset_id,
            input: item.input,
            output: item.output,
            metadata: item.metadata,
        };

        let mut history = self.list(None).await?;
        history.insert(0, entry.clone());
        history.truncate(cap);

        self.write(&history).await?;
        debug!(id = %entry.id, preset = %entry.preset_id, "saved history item");
        Ok(entry.id)
    }

    /// List history items, newest first, optionally limited.
    pub async fn list(&self, limit: Option<usize>) -> AppResult<Vec<HistoryItem>> {
        let mut history: Vec<HistoryItem> = match self.kv.get(HISTORY_KEY).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| AppError::storage(format!("Failed to parse history: {}", e)))?,
            None => Vec::new(),
        };
        if let Some(limit) = limit {
            history.truncate(limit);
        }
        Ok(history)
    }

    /// Delete one history item by id; absent ids are not an error.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut history = self.list(None).await?;
        history.retain(|item| item.id != id);
        self.write(&history).await
    }

    /// Remove the entire history collection.
    pub async fn clear(&self) -> AppResult<()> {
        self.kv.remove(HISTORY_KEY).await
    }

    async fn write(&self, history: &[HistoryItem]) -> AppResult<()> {
        let json = serde_json::to_string(history)
            .map_err(|e| AppError::storage(format!("Failed to serialize history: {}", e)))?;
        self.kv.set(HISTORY_KEY, &json).await
    }
}

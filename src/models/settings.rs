//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};
use url::Url;

/// Application configuration stored under the settings key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Active provider: "ollama" or "openai"
    pub provider: String,
    pub ollama: OllamaSettings,
    pub openai: OpenAiSettings,
    pub ui: UiSettings,
}

/// Ollama endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OllamaSettings {
    pub url: String,
    pub model: String,
    /// Per-request deadline in seconds
    pub timeout_secs: u64,
}

/// OpenAI settings; unused until an OpenAI provider exists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: String,
}

/// UI behavior flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    /// Paste the enhanced prompt into the frontmost app after enhancement
    pub auto_paste: bool,
    pub save_to_history: bool,
    pub max_history_items: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            ollama: OllamaSettings {
                url: "http://localhost:11434".to_string(),
                model: "llama3.2:3b".to_string(),
                timeout_secs: 30,
            },
            openai: OpenAiSettings {
                api_key: None,
                base_url: None,
                model: "gpt-4o-mini".to_string(),
            },
            ui: UiSettings {
                auto_paste: false,
                save_to_history: true,
                max_history_items: 50,
            },
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub provider: Option<String>,
    pub ollama_url: Option<String>,
    pub ollama_model: Option<String>,
    pub ollama_timeout_secs: Option<u64>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub openai_model: Option<String>,
    pub auto_paste: Option<bool>,
    pub save_to_history: Option<bool>,
    pub max_history_items: Option<usize>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(provider) = update.provider {
            self.provider = provider;
        }
        if let Some(url) = update.ollama_url {
            self.ollama.url = url;
        }
        if let Some(model) = update.ollama_model {
            self.ollama.model = model;
        }
        if let Some(timeout) = update.ollama_timeout_secs {
            self.ollama.timeout_secs = timeout;
        }
        if let Some(api_key) = update.openai_api_key {
            self.openai.api_key = Some(api_key);
        }
        if let Some(base_url) = update.openai_base_url {
            self.openai.base_url = Some(base_url);
        }
        if let Some(model) = update.openai_model {
            self.openai.model = model;
        }
        if let Some(auto_paste) = update.auto_paste {
            self.ui.auto_paste = auto_paste;
        }
        if let Some(save) = update.save_to_history {
            self.ui.save_to_history = save;
        }
        if let Some(max) = update.max_history_items {
            self.ui.max_history_items = max;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !["ollama", "openai"].contains(&self.provider.as_str()) {
            return Err(format!(
                "Invalid provider: {}. Must be 'ollama' or 'openai'",
                self.provider
            ));
        }

        if self.provider == "ollama" {
            if self.ollama.url.trim().is_empty() {
                return Err("Ollama URL is required".to_string());
            }
            if Url::parse(&self.ollama.url).is_err() {
                return Err(format!("Invalid Ollama URL: {}", self.ollama.url));
            }
            if self.ollama.model.trim().is_empty() {
                return Err("Ollama model is required".to_string());
            }
            if self.ollama.timeout_secs == 0 {
                return Err("Ollama timeout must be at least 1 second".to_string());
            }
        }

        if self.provider == "openai" && self.openai.api_key.is_none() {
            return Err("OpenAI API key is required".to_string());
        }

        if self.ui.max_history_items == 0 {
            return Err("maxHistoryItems must be at least 1".to_string());
        }

        Ok(())
    }
}

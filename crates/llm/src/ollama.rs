//! Ollama Provider
//!
//! Implementation of the `EnhanceProvider` trait for a local Ollama server.
//! Uses the non-streaming chat endpoint; responses are returned whole.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::http_client::build_http_client;
use crate::provider::{parse_http_error, EnhanceProvider};
use crate::types::{LlmError, LlmResult, ProviderConfig};

/// Deadline for the availability probe; intentionally much shorter than
/// the enhancement deadline so a dead server fails fast.
const AVAILABILITY_TIMEOUT_SECS: u64 = 5;

/// Ollama chat response (non-streaming)
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: Option<String>,
}

/// Ollama tag listing response
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    models: Option<Vec<OllamaModelTag>>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}

/// Provider speaking to a local Ollama server
pub struct OllamaProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(Duration::from_secs(config.timeout_secs));
        Self { config, client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn map_send_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            return LlmError::Timeout {
                seconds: self.config.timeout_secs,
            };
        }
        if err.is_connect() {
            return LlmError::Network {
                message: "Cannot connect to Ollama. Make sure Ollama is running.".to_string(),
            };
        }
        LlmError::Network {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl EnhanceProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn enhance(&self, prompt: &str) -> LlmResult<String> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt,
                }
            ],
            "stream": false,
        });

        debug!(model = %self.config.model, "sending chat request to Ollama");

        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "ollama"));
        }

        let chat: OllamaChatResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::InvalidResponse {
                message: format!("Failed to parse Ollama response: {}", e),
            })?;

        let content = chat
            .message
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LlmError::InvalidResponse {
                message: "Ollama response contained no message content".to_string(),
            })?;

        Ok(content.trim().to_string())
    }

    async fn is_available(&self) -> bool {
        let result = self
            .client
            .get(self.endpoint("/api/version"))
            .timeout(Duration::from_secs(AVAILABILITY_TIMEOUT_SECS))
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_models(&self) -> LlmResult<Vec<String>> {
        // Model listing is advisory; a dead server just means an empty list.
        let response = match self.client.get(self.endpoint("/api/tags")).send().await {
            Ok(r) => r,
            Err(_) => return Ok(Vec::new()),
        };

        if !response.status().is_success() {
            return Ok(Vec::new());
        }

        let tags: OllamaTagsResponse = match response.json().await {
            Ok(t) => t,
            Err(_) => return Ok(Vec::new()),
        };

        Ok(tags
            .models
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.name)
            .collect())
    }
}

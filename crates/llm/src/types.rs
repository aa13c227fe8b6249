//! Provider Types
//!
//! Error taxonomy and configuration shared by all provider implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by LLM providers.
///
/// Transport-level failures (`Network`, `Timeout`) are kept distinct from
/// provider-level failures so callers can present different guidance for
/// "your connection is broken" vs "the backend rejected the request".
#[derive(Debug, Error)]
pub enum LlmError {
    /// Provider is not reachable or not running
    #[error("Provider unavailable: {message}")]
    Unavailable { message: String },

    /// Transport-level failure (connection refused, DNS, TLS)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The request exceeded the configured deadline
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The requested model is not installed on the backend
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    /// Backend returned a 5xx status
    #[error("Server error: {message}")]
    ServerError {
        message: String,
        status: Option<u16>,
    },

    /// Backend rejected the request as malformed
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Backend answered with a body we could not interpret
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

/// Result type alias for provider operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Configuration for an HTTP-based provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the backend, e.g. "http://localhost:11434"
    pub base_url: String,
    /// Model identifier, e.g. "llama3.2:3b"
    pub model: String,
    /// Per-request deadline in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            timeout_secs: 30,
        }
    }
}

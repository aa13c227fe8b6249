//! Provider Trait
//!
//! Defines the common interface for enhancement backends.

use async_trait::async_trait;

use crate::types::{LlmError, LlmResult};

/// Trait that all enhancement providers must implement.
///
/// A provider receives a single fully rendered prompt; template rendering
/// and preset resolution happen upstream so this crate stays free of
/// application data models.
#[async_trait]
pub trait EnhanceProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Send the rendered prompt and return the complete enhanced text.
    ///
    /// No partial output is ever returned: a timeout or transport failure
    /// yields an error, never a truncated string.
    async fn enhance(&self, prompt: &str) -> LlmResult<String>;

    /// Check whether the backend is reachable.
    async fn is_available(&self) -> bool;

    /// List models installed on the backend (if supported by provider).
    async fn list_models(&self) -> LlmResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Map an HTTP error status to an `LlmError`.
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Unavailable {
            message: format!("{}: HTTP {}: {}", provider, status, body),
        },
    }
}

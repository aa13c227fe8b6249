//! Promptify LLM
//!
//! Provider abstraction for the enhancement backend:
//! - `EnhanceProvider` trait (single-shot enhancement, availability,
//!   model listing)
//! - `OllamaProvider` for local inference
//! - HTTP client factory and shared error taxonomy

pub mod http_client;
pub mod ollama;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use ollama::OllamaProvider;
pub use provider::EnhanceProvider;
pub use types::{LlmError, LlmResult, ProviderConfig};

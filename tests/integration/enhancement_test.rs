//! Enhancement Flow Integration Tests
//!
//! Drives the full clipboard-to-result flow with a mock provider and a
//! mock clipboard over the in-memory backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use promptify::{
    AppError, AppResult, AppState, Clipboard, EnhanceProvider, LlmError, LlmResult,
    MemoryKvBackend, Preset, SettingsUpdate, SharedKv,
};

// ============================================================================
// Mocks
// ============================================================================

/// Provider that records the prompt it was given and answers canned text
struct MockProvider {
    reply: Option<String>,
    seen_prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            seen_prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            seen_prompts: Mutex::new(Vec::new()),
        })
    }

    fn last_prompt(&self) -> Option<String> {
        self.seen_prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EnhanceProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn enhance(&self, prompt: &str) -> LlmResult<String> {
        self.seen_prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Network {
                message: "connection refused".to_string(),
            }),
        }
    }

    async fn is_available(&self) -> bool {
        self.reply.is_some()
    }
}

/// Clipboard with fixed contents that records pastes
struct MockClipboard {
    text: Option<String>,
    pasted: Mutex<Vec<String>>,
}

impl MockClipboard {
    fn with_text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Some(text.to_string()),
            pasted: Mutex::new(Vec::new()),
        })
    }

    fn empty() -> Arc<Self> {
        Arc::new(Self {
            text: None,
            pasted: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn read_text(&self) -> AppResult<Option<String>> {
        Ok(self.text.clone())
    }

    async fn write_text(&self, _text: &str) -> AppResult<()> {
        Ok(())
    }

    async fn paste_text(&self, text: &str) -> AppResult<()> {
        self.pasted.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn state_with(provider: Arc<MockProvider>, clipboard: Arc<MockClipboard>) -> AppState {
    let kv: SharedKv = Arc::new(MemoryKvBackend::new());
    AppState::new(kv, provider, clipboard)
}

fn custom(id: &str, template: &str) -> Preset {
    Preset {
        id: id.to_string(),
        name: format!("Preset {}", id),
        description: String::new(),
        system_prompt: template.to_string(),
        tags: vec![],
        is_built_in: false,
        examples: vec![],
        created_at: None,
        updated_at: None,
    }
}

// ============================================================================
// Happy Path
// ============================================================================

#[tokio::test]
async fn test_enhance_clipboard_with_built_in_preset() {
    let provider = MockProvider::answering("much better prompt");
    let clipboard = MockClipboard::with_text("Write about dogs");
    let state = state_with(provider.clone(), clipboard);

    let result = state.enhancer().enhance_clipboard("general").await.unwrap();

    assert_eq!(result.output, "much better prompt");
    assert_eq!(result.preset_id, "general");
    assert_eq!(result.metadata.provider, "mock");
    assert_eq!(result.metadata.model.as_deref(), Some("mock-model"));

    // The rendered prompt embeds the clipboard text via {{input}}.
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("Write about dogs"));
    assert!(!prompt.contains("{{input}}"));
}

#[tokio::test]
async fn test_enhance_renders_custom_template() {
    let provider = MockProvider::answering("ok");
    let clipboard = MockClipboard::with_text("Hello world");
    let state = state_with(provider.clone(), clipboard);

    state
        .presets()
        .upsert(custom("rewrite", "Rewrite this:\n\n{{input}}"))
        .await
        .unwrap();

    state.enhancer().enhance_clipboard("rewrite").await.unwrap();
    assert_eq!(
        provider.last_prompt().unwrap(),
        "Rewrite this:\n\nHello world"
    );
}

#[tokio::test]
async fn test_enhance_saves_history_by_default() {
    let provider = MockProvider::answering("enhanced");
    let clipboard = MockClipboard::with_text("some raw input");
    let state = state_with(provider, clipboard);

    state.enhancer().enhance_clipboard("general").await.unwrap();

    let history = state.history().list(None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].input, "some raw input");
    assert_eq!(history[0].output, "enhanced");
    assert_eq!(history[0].metadata.provider, "mock");
}

#[tokio::test]
async fn test_enhance_respects_save_to_history_off() {
    let provider = MockProvider::answering("enhanced");
    let clipboard = MockClipboard::with_text("some raw input");
    let state = state_with(provider, clipboard);

    state
        .settings()
        .update(SettingsUpdate {
            save_to_history: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    state.enhancer().enhance_clipboard("general").await.unwrap();
    assert!(state.history().list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_enhance_auto_paste() {
    let provider = MockProvider::answering("pasted result");
    let clipboard = MockClipboard::with_text("some raw input");
    let state = state_with(provider, clipboard.clone());

    state
        .settings()
        .update(SettingsUpdate {
            auto_paste: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    state.enhancer().enhance_clipboard("general").await.unwrap();
    assert_eq!(
        clipboard.pasted.lock().unwrap().as_slice(),
        ["pasted result"]
    );
}

// ============================================================================
// Failure Paths
// ============================================================================

#[tokio::test]
async fn test_empty_clipboard_is_clipboard_error() {
    let provider = MockProvider::answering("unused");
    let state = state_with(provider, MockClipboard::empty());

    let err = state
        .enhancer()
        .enhance_clipboard("general")
        .await
        .unwrap_err();
    match err {
        AppError::Clipboard(msg) => assert!(msg.contains("clipboard")),
        other => panic!("expected clipboard error, got {}", other),
    }
}

#[tokio::test]
async fn test_whitespace_clipboard_is_clipboard_error() {
    let provider = MockProvider::answering("unused");
    let state = state_with(provider, MockClipboard::with_text("   \n  "));

    let err = state
        .enhancer()
        .enhance_clipboard("general")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Clipboard(_)));
}

#[tokio::test]
async fn test_too_short_input_is_validation_error() {
    let provider = MockProvider::answering("unused");
    let state = state_with(provider, MockClipboard::empty());

    let err = state
        .enhancer()
        .enhance_text("ab", "general")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_unknown_preset_is_not_found() {
    let provider = MockProvider::answering("unused");
    let state = state_with(provider, MockClipboard::with_text("valid input"));

    let err = state
        .enhancer()
        .enhance_clipboard("missing-preset")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_provider_failure_surfaces_and_saves_nothing() {
    let provider = MockProvider::failing();
    let state = state_with(provider, MockClipboard::with_text("valid input"));

    let err = state
        .enhancer()
        .enhance_clipboard("general")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Network(_)));

    // A failed enhancement never reaches history.
    assert!(state.history().list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_provider_availability_passthrough() {
    let up = state_with(
        MockProvider::answering("x"),
        MockClipboard::with_text("text"),
    );
    assert!(up.enhancer().provider_available().await);

    let down = state_with(MockProvider::failing(), MockClipboard::with_text("text"));
    assert!(!down.enhancer().provider_available().await);
}

#[tokio::test]
async fn test_input_is_sanitized_before_rendering() {
    let provider = MockProvider::answering("ok");
    let clipboard = MockClipboard::with_text("line1\r\nline2\n\n\n\nline3");
    let state = state_with(provider.clone(), clipboard);

    let result = state.enhancer().enhance_clipboard("general").await.unwrap();
    assert_eq!(result.input, "line1\nline2\n\nline3");
    assert!(provider.last_prompt().unwrap().contains("line1\nline2\n\nline3"));
}

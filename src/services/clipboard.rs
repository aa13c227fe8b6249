//! Clipboard Port
//!
//! The clipboard is a host-platform concern; this crate only defines the
//! contract the enhancement flow needs. The command-palette host supplies
//! the implementation.

use async_trait::async_trait;

use crate::utils::error::AppResult;

/// Host clipboard access
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Read the current clipboard text; `None` when the clipboard holds
    /// no text
    async fn read_text(&self) -> AppResult<Option<String>>;

    /// Replace the clipboard contents
    async fn write_text(&self, text: &str) -> AppResult<()>;

    /// Write the text and simulate a paste into the active context
    async fn paste_text(&self, text: &str) -> AppResult<()>;
}

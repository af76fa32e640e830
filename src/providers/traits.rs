//! Provider traits for the external backends.
//!
//! Services depend on these traits rather than on concrete HTTP clients so
//! that handles can be injected at startup and replaced with fakes in
//! tests. All errors are terminal; nothing here retries.

use async_trait::async_trait;

use crate::Result;
use crate::types::Message;

// ============================================================================
// Completion Provider
// ============================================================================

/// Provider for text completion over a chat-style API.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Run one completion and return the generated text.
    ///
    /// A response without content yields an empty string rather than an
    /// error.
    async fn complete(&self, messages: &[Message], max_tokens: u32) -> Result<String>;
}

// ============================================================================
// Translation Provider
// ============================================================================

/// Provider for free-text translation.
///
/// Implementations must keep line breaks: the subtitle service submits one
/// entry per line and expects the same number of lines back.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Translate `text` into `target_language` (e.g. "zh-cn", "fr").
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

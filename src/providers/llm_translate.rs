//! Translation through the completion API.

use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{CompletionProvider, TranslationProvider};
use crate::Result;
use crate::types::Message;

/// Default completion budget for one translated batch.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Translates by prompting a [`CompletionProvider`].
///
/// The prompt asks the model to keep the dialogue coherent and the tone
/// intact, and to return exactly one output line per input line.
pub struct CompletionTranslator {
    completion: Arc<dyn CompletionProvider>,
    max_tokens: u32,
}

impl CompletionTranslator {
    pub fn new(completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            completion,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the completion budget per batch.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

fn translation_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following subtitle text into {target_language}. \
         Keep the context coherent and the emotional tone accurate. \
         Return only the translation, with exactly one output line for each input line \
         and in the same order.\n\n{text}"
    )
}

#[async_trait]
impl TranslationProvider for CompletionTranslator {
    fn name(&self) -> &str {
        "completion"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let messages = [Message::user(translation_prompt(text, target_language))];
        self.completion.complete(&messages, self.max_tokens).await
    }
}

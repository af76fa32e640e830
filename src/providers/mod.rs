//! Clients for the external completion and translation backends.

pub mod completion;
pub mod google;
pub mod llm_translate;
pub mod traits;

pub use completion::CompletionClient;
pub use google::GoogleTranslateClient;
pub use llm_translate::CompletionTranslator;
pub use traits::{CompletionProvider, TranslationProvider};

//! rtags - cached LLM tag extraction and subtitle translation
//!
//! The crate exposes two services, usable as a library or through the
//! `rtagsd` HTTP daemon (feature `server`):
//!
//! - [`TagService`] asks a completion API for five tags describing a text
//!   and its reference websites, caching answers by request content.
//! - [`SubtitleTranslator`] translates SRT files in batches while keeping
//!   every caption on its original timing.
//!
//! # Tagging Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rtags::{CompletionClient, MemoryCache, TagRequest, TagService};
//!
//! #[tokio::main]
//! async fn main() -> rtags::Result<()> {
//!     let service = TagService::new(
//!         Arc::new(CompletionClient::new("pplx-your-key")?),
//!         Arc::new(MemoryCache::new()),
//!     );
//!
//!     let tags = service
//!         .extract(&TagRequest::new(
//!             "Tokio is an asynchronous runtime for Rust.",
//!             vec!["https://tokio.rs".to_string()],
//!         ))
//!         .await?;
//!
//!     println!("{}", tags.join(", "));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;
pub mod subtitle;
pub mod tagging;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use cache::{CacheBackend, MemoryCache, cache_key};
pub use error::{Result, RtagsError};
pub use providers::{
    CompletionClient, CompletionProvider, CompletionTranslator, GoogleTranslateClient,
    TranslationProvider,
};
pub use subtitle::SubtitleTranslator;
pub use tagging::TagService;
pub use types::{Message, Role, SubtitleEntry, TagRequest, TagResponse, Timestamp};
pub use version::{PKG_VERSION, USER_AGENT, build_timestamp, version_string};

#[cfg(feature = "redis")]
pub use cache::RedisCache;

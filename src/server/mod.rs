//! HTTP service mode.
//!
//! This module provides:
//! - Configuration types (`config`)
//! - Bearer-token authentication middleware (`auth`)
//! - Error-to-response mapping (`error`)
//! - The axum router and handlers (`routes`)
//!
//! [`build_state`] wires the configured backends into an [`AppState`]; the
//! handles it creates live for the whole process and are shared by
//! reference-counted clones across requests.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

pub use auth::TokenAllowList;
pub use routes::{AppState, router};

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::Result;
use crate::cache::{CacheBackend, MemoryCache};
use crate::providers::{
    CompletionClient, CompletionProvider, CompletionTranslator, GoogleTranslateClient,
    TranslationProvider,
};
use crate::subtitle::SubtitleTranslator;
use crate::tagging::TagService;
use config::{CacheKind, Config, Secrets, TranslatorKind};

/// Build the shared handles from configuration.
pub fn build_state(config: &Config, secrets: &Secrets) -> Result<AppState> {
    let completion: Arc<dyn CompletionProvider> = Arc::new(CompletionClient::with_options(
        secrets.api_key.clone(),
        config.completion.base_url.clone(),
        config.completion.model.clone(),
        Duration::from_secs(config.completion.timeout_secs),
    )?);

    let cache = build_cache(config, secrets)?;
    info!(backend = cache.name(), "cache configured");

    let translator: Arc<dyn TranslationProvider> = match config.translation.backend {
        TranslatorKind::Google => Arc::new(GoogleTranslateClient::with_options(
            config.translation.base_url.clone(),
            Duration::from_secs(config.translation.timeout_secs),
        )?),
        TranslatorKind::Completion => Arc::new(
            CompletionTranslator::new(completion.clone()).max_tokens(config.translation.max_tokens),
        ),
    };
    info!(backend = translator.name(), "translation backend configured");

    let tags = TagService::new(completion, cache).ttl(Duration::from_secs(config.cache.ttl_secs));

    Ok(AppState {
        tags,
        subtitles: SubtitleTranslator::new(translator),
        default_target_language: config.translation.target_language.clone(),
        default_split_threshold: config.translation.split_threshold,
    })
}

fn build_cache(config: &Config, secrets: &Secrets) -> Result<Arc<dyn CacheBackend>> {
    match config.cache.backend {
        CacheKind::Memory => Ok(Arc::new(MemoryCache::with_max_entries(
            config.cache.max_entries,
        ))),
        #[cfg(feature = "redis")]
        CacheKind::Redis => {
            let url = secrets.redis_url.as_deref().unwrap_or(&config.cache.url);
            Ok(Arc::new(crate::cache::RedisCache::new(url)?))
        }
        #[cfg(not(feature = "redis"))]
        CacheKind::Redis => {
            let _ = secrets;
            Err(crate::RtagsError::Configuration(
                "cache backend 'redis' requires the `redis` feature".to_string(),
            ))
        }
    }
}

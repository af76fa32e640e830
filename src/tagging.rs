//! Cached tag extraction.
//!
//! [`TagService`] wraps a [`CompletionProvider`] with a [`CacheBackend`]:
//!
//! 1. derive the request's cache key ([`cache_key`]);
//! 2. on a hit, return the stored tags unchanged;
//! 3. on a miss, prompt the model, post-process its answer into at most
//!    [`MAX_TAGS`] tags and store them for [`DEFAULT_TTL`].
//!
//! The cache is an optimisation only. A failing store is logged and
//! counted, and the request carries on as if the key were absent.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheBackend, DEFAULT_TTL, cache_key};
use crate::providers::CompletionProvider;
use crate::types::{MAX_TAGS, Message, TagRequest};
use crate::{Result, telemetry};

/// Completion budget for a tag list.
pub const TAG_MAX_TOKENS: u32 = 50;

const SYSTEM_PROMPT: &str = "You are a tag extraction assistant. Extract 5 relevant tags from \
the given text and reference websites. Return only the tags, separated by commas.";

/// Tag extraction backed by a completion API and a cache store.
#[derive(Clone)]
pub struct TagService {
    completion: Arc<dyn CompletionProvider>,
    cache: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl TagService {
    pub fn new(completion: Arc<dyn CompletionProvider>, cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            completion,
            cache,
            ttl: DEFAULT_TTL,
        }
    }

    /// Override the cache TTL.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Validate `request` and return its tags, from cache when possible.
    #[instrument(
        name = "tags.extract",
        skip_all,
        fields(websites = request.reference_websites.len())
    )]
    pub async fn extract(&self, request: &TagRequest) -> Result<Vec<String>> {
        request.validate()?;

        let key = cache_key(&request.text, &request.reference_websites);
        let backend = self.cache.name().to_string();

        if let Some(cached) = self.cached(&key).await {
            info!(key = %key, "cache hit");
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "backend" => backend).increment(1);
            return Ok(cached.split(',').map(str::to_string).collect());
        }

        info!(key = %key, "cache miss, querying completion API");
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "backend" => backend).increment(1);

        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(user_prompt(request)),
        ];
        let content = match self.completion.complete(&messages, TAG_MAX_TOKENS).await {
            Ok(content) => {
                metrics::counter!(telemetry::COMPLETION_REQUESTS_TOTAL, "status" => "ok")
                    .increment(1);
                content
            }
            Err(e) => {
                metrics::counter!(telemetry::COMPLETION_REQUESTS_TOTAL, "status" => "error")
                    .increment(1);
                return Err(e);
            }
        };

        let tags = parse_tags(&content);
        debug!(count = tags.len(), "parsed tags");

        self.store(&key, &tags.join(",")).await;
        Ok(tags)
    }

    /// Cache lookup; store failures and empty values count as a miss.
    async fn cached(&self, key: &str) -> Option<String> {
        match self.cache.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(
                    backend = self.cache.name(),
                    error = %e,
                    "cache lookup failed, continuing uncached"
                );
                metrics::counter!(
                    telemetry::CACHE_ERRORS_TOTAL,
                    "backend" => self.cache.name().to_string(),
                    "operation" => "get"
                )
                .increment(1);
                None
            }
        }
    }

    /// Best-effort cache write.
    async fn store(&self, key: &str, value: &str) {
        if let Err(e) = self.cache.set(key, value, self.ttl).await {
            warn!(backend = self.cache.name(), error = %e, "cache write failed");
            metrics::counter!(
                telemetry::CACHE_ERRORS_TOTAL,
                "backend" => self.cache.name().to_string(),
                "operation" => "set"
            )
            .increment(1);
        }
    }
}

fn user_prompt(request: &TagRequest) -> String {
    format!(
        "Text: {}\nReference Websites: {}",
        request.text,
        request.reference_websites.join(", ")
    )
}

/// Turn raw model output into at most [`MAX_TAGS`] tags.
///
/// Comma-separated output is preferred. When that yields fewer than
/// `MAX_TAGS` tags the content is re-split on newlines instead, which
/// covers models that answer with one tag per line.
pub fn parse_tags(content: &str) -> Vec<String> {
    let split_trimmed = |sep: char| -> Vec<String> {
        content
            .split(sep)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    };

    let mut tags = split_trimmed(',');
    if tags.len() < MAX_TAGS {
        tags = split_trimmed('\n');
    }
    tags.truncate(MAX_TAGS);
    tags
}

//! Google Translate client using the public `translate_a/single` endpoint.
//!
//! The endpoint needs no API key. It answers with nested JSON arrays whose
//! first element lists translated segments in order:
//!
//! ```text
//! [[["Bonjour\n","Hello\n",null,null,10],["le monde","world",null,null,10]],null,"en",...]
//! ```
//!
//! Concatenating the first string of each segment yields the translation,
//! line breaks included.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use super::traits::TranslationProvider;
use crate::{Result, RtagsError};

/// Default base URL for the Google Translate endpoint.
pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Client for Google's keyless translation endpoint.
#[derive(Clone)]
pub struct GoogleTranslateClient {
    http: Client,
    base_url: String,
}

impl GoogleTranslateClient {
    /// Create a client for the public endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(base_url, Duration::from_secs(60))
    }

    pub fn with_options(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::version::USER_AGENT)
            .build()
            .map_err(|e| RtagsError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateClient {
    fn name(&self) -> &str {
        "google"
    }

    #[instrument(name = "google.translate", skip(self, text), fields(chars = text.len()))]
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let url = format!("{}/translate_a/single", self.base_url);

        // The text goes in the form body; long batches overflow URL limits.
        let response = self
            .http
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| RtagsError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RtagsError::Api {
                status: status.as_u16(),
                message: format!("Google Translate error: {status}"),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RtagsError::Http(e.to_string()))?;

        join_segments(&body)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
fn join_segments(body: &Value) -> Result<String> {
    let segments = match body.get(0) {
        Some(Value::Array(segments)) => segments,
        // An empty input translates to `[null, ...]`.
        Some(Value::Null) => return Ok(String::new()),
        _ => return Err(RtagsError::EmptyResponse("Google Translate")),
    };

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

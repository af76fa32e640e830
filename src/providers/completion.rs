//! Client for OpenAI-compatible chat completion APIs.
//!
//! Defaults target Perplexity's `sonar` model, but any endpoint speaking
//! `POST /chat/completions` works.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::traits::CompletionProvider;
use crate::types::Message;
use crate::{Result, RtagsError};

/// Default base URL for the completion API.
pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "sonar";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for a chat completion endpoint with a fixed model.
#[derive(Clone)]
pub struct CompletionClient {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
}

impl CompletionClient {
    /// Create a client for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, base_url, DEFAULT_MODEL, DEFAULT_TIMEOUT)
    }

    /// Create a client with every knob set explicitly.
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::version::USER_AGENT)
            .build()
            .map_err(|e| RtagsError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check response status and map to an error carrying the API's message.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        Err(RtagsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    fn name(&self) -> &str {
        "completion"
    }

    #[instrument(name = "completion.complete", skip(self, messages), fields(model = %self.model))]
    async fn complete(&self, messages: &[Message], max_tokens: u32) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatCompletionRequest {
                model: &self.model,
                messages,
                max_tokens,
            })
            .send()
            .await
            .map_err(|e| RtagsError::Http(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RtagsError::Http(e.to_string()))?;

        Ok(completion.into_content())
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice; empty when absent.
    fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// `{"error": {"message": "..."}}` as returned by OpenAI-style APIs.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

impl ApiErrorBody {
    fn into_message(self) -> Option<String> {
        self.error.and_then(|e| e.message)
    }
}

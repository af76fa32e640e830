//! Integration tests for HTTP service mode.
//!
//! Starts an in-process rtagsd router with scripted backends and drives it
//! with reqwest, covering authentication, validation and both routes.

#![cfg(feature = "server")]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use rtags::server::{AppState, TokenAllowList, router};
use rtags::{
    CompletionProvider, MemoryCache, Message, Result, RtagsError, SubtitleTranslator, TagService,
    TranslationProvider,
};
use tokio::net::TcpListener;

const TOKEN: &str = "secret-token";

const SAMPLE_SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n\
                          2\n00:00:03,000 --> 00:00:04,000\nGoodbye\n";

// ============================================================================
// Scripted backends
// ============================================================================

struct FixedCompletion(&'static str);

#[async_trait]
impl CompletionProvider for FixedCompletion {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, _messages: &[Message], _max_tokens: u32) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Prefixes every line with the target language.
struct TaggingTranslator;

#[async_trait]
impl TranslationProvider for TaggingTranslator {
    fn name(&self) -> &str {
        "tagging"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        Ok(text
            .lines()
            .map(|line| format!("[{target_language}] {line}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

struct DownTranslator;

#[async_trait]
impl TranslationProvider for DownTranslator {
    fn name(&self) -> &str {
        "down"
    }

    async fn translate(&self, _text: &str, _target_language: &str) -> Result<String> {
        Err(RtagsError::Http("connection refused".to_string()))
    }
}

// ============================================================================
// Server harness
// ============================================================================

/// Start a test server on a random port and return its base URL.
async fn start_test_server(translator: Arc<dyn TranslationProvider>) -> String {
    let state = AppState {
        tags: TagService::new(
            Arc::new(FixedCompletion("rust, web, async, cache, redis")),
            Arc::new(MemoryCache::new()),
        ),
        subtitles: SubtitleTranslator::new(translator),
        default_target_language: "zh-cn".to_string(),
        default_split_threshold: 200,
    };
    let app = router(state, TokenAllowList::new([TOKEN]), 1024 * 1024);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn srt_form(filename: &str, body: &str) -> Form {
    Form::new().part(
        "file",
        Part::bytes(body.as_bytes().to_vec()).file_name(filename.to_string()),
    )
}

async fn detail(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.unwrap();
    body["detail"].as_str().unwrap_or_default().to_string()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn missing_token_is_forbidden() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/rtags"))
        .json(&serde_json::json!({"text": "t", "reference_websites": ["a.com"]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(detail(response).await, "Not authenticated");
}

#[tokio::test]
async fn unknown_token_is_forbidden() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/translate"))
        .bearer_auth("wrong")
        .multipart(srt_form("a.srt", SAMPLE_SRT))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(detail(response).await, "Invalid token");
}

#[tokio::test]
async fn non_bearer_scheme_is_forbidden() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/rtags"))
        .basic_auth("user", Some(TOKEN))
        .json(&serde_json::json!({"text": "t", "reference_websites": ["a.com"]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// /rtags
// ============================================================================

#[tokio::test]
async fn rtags_returns_tags() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/rtags"))
        .bearer_auth(TOKEN)
        .json(&serde_json::json!({
            "text": "Tokio is an async runtime",
            "reference_websites": ["https://tokio.rs"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"tags": ["rust", "web", "async", "cache", "redis"]})
    );
}

#[tokio::test]
async fn rtags_rejects_empty_text() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/rtags"))
        .bearer_auth(TOKEN)
        .json(&serde_json::json!({"text": "", "reference_websites": ["a.com"]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(detail(response).await, "Text cannot be empty.");
}

#[tokio::test]
async fn rtags_rejects_too_many_websites() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;
    let websites: Vec<String> = (0..11).map(|i| format!("https://s{i}.com")).collect();

    let response = reqwest::Client::new()
        .post(format!("{base}/rtags"))
        .bearer_auth(TOKEN)
        .json(&serde_json::json!({"text": "t", "reference_websites": websites}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(detail(response).await, "Too many reference websites (max 10).");
}

#[tokio::test]
async fn rtags_rejects_malformed_body() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/rtags"))
        .bearer_auth(TOKEN)
        .header("content-type", "application/json")
        .body("{\"text\": 42}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// /translate
// ============================================================================

#[tokio::test]
async fn translate_returns_attachment() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/translate?target_language=fr"))
        .bearer_auth(TOKEN)
        .multipart(srt_form("movie.srt", SAMPLE_SRT))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=translated.srt"
    );
    assert_eq!(
        response.text().await.unwrap(),
        "1\n00:00:01,000 --> 00:00:02,000\n[fr] Hello\n\n\
         2\n00:00:03,000 --> 00:00:04,000\n[fr] Goodbye\n\n"
    );
}

#[tokio::test]
async fn translate_uses_default_language_and_form_fields() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/translate"))
        .bearer_auth(TOKEN)
        .multipart(srt_form("movie.srt", SAMPLE_SRT))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("[zh-cn] Hello"));

    let response = client
        .post(format!("{base}/translate"))
        .bearer_auth(TOKEN)
        .multipart(
            srt_form("movie.srt", SAMPLE_SRT)
                .text("target_language", "ja")
                .text("split_threshold", "1"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("[ja] Goodbye"));
}

#[tokio::test]
async fn translate_rejects_non_srt_upload() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/translate"))
        .bearer_auth(TOKEN)
        .multipart(srt_form("x.ass", SAMPLE_SRT))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(detail(response).await, "Only .srt files are supported");
}

#[tokio::test]
async fn translate_requires_file_field() {
    let base = start_test_server(Arc::new(TaggingTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/translate"))
        .bearer_auth(TOKEN)
        .multipart(Form::new().text("target_language", "fr"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(detail(response).await, "missing multipart field 'file'");
}

#[tokio::test]
async fn translate_backend_failure_is_server_error() {
    let base = start_test_server(Arc::new(DownTranslator)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/translate"))
        .bearer_auth(TOKEN)
        .multipart(srt_form("movie.srt", SAMPLE_SRT))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = detail(response).await;
    assert!(detail.starts_with("Error communicating with translation backend (down)"));
    assert!(detail.contains("connection refused"));
}

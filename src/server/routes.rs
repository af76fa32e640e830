//! HTTP routes.
//!
//! - `POST /rtags`: JSON [`TagRequest`] in, JSON [`TagResponse`] out.
//! - `POST /translate`: multipart `file` upload, translated SRT back as an
//!   attachment. `target_language` and `split_threshold` may be given as
//!   query parameters or as multipart text fields.
//!
//! Every route sits behind the bearer-token middleware.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, middleware};
use serde::Deserialize;
use tracing::info;

use super::auth::{TokenAllowList, require_bearer};
use super::error::ApiError;
use crate::RtagsError;
use crate::subtitle::SubtitleTranslator;
use crate::tagging::TagService;
use crate::types::{TagRequest, TagResponse};

/// Attachment name of the translated file.
pub const TRANSLATED_FILENAME: &str = "translated.srt";

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub tags: TagService,
    pub subtitles: SubtitleTranslator,
    pub default_target_language: String,
    pub default_split_threshold: usize,
}

/// Build the application router.
pub fn router(state: AppState, allow_list: TokenAllowList, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/rtags", post(extract_tags))
        .route("/translate", post(translate_subtitle))
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            Arc::new(allow_list),
            require_bearer,
        ))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

async fn extract_tags(
    State(state): State<AppState>,
    payload: Result<Json<TagRequest>, JsonRejection>,
) -> Result<Json<TagResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| RtagsError::InvalidInput(e.body_text()))?;

    let tags = state
        .tags
        .extract(&request)
        .await
        .map_err(|e| ApiError::backend(e, "Error communicating with completion API"))?;

    Ok(Json(TagResponse { tags }))
}

/// Optional overrides for `/translate`.
#[derive(Debug, Default, Deserialize)]
pub struct TranslateParams {
    pub target_language: Option<String>,
    pub split_threshold: Option<usize>,
}

async fn translate_subtitle(
    State(state): State<AppState>,
    params: Result<Query<TranslateParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let Query(mut params) = params.map_err(|e| RtagsError::InvalidInput(e.body_text()))?;
    let mut multipart = multipart.map_err(|e| RtagsError::InvalidInput(e.body_text()))?;

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RtagsError::InvalidInput(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| RtagsError::InvalidInput(e.body_text()))?;
                upload = Some((filename, data));
            }
            Some("target_language") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| RtagsError::InvalidInput(e.body_text()))?;
                params.target_language = Some(value);
            }
            Some("split_threshold") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| RtagsError::InvalidInput(e.body_text()))?;
                let parsed = value.trim().parse().map_err(|_| {
                    RtagsError::InvalidInput(format!("invalid split_threshold '{value}'"))
                })?;
                params.split_threshold = Some(parsed);
            }
            _ => {}
        }
    }

    let (filename, data) = upload
        .ok_or_else(|| RtagsError::InvalidInput("missing multipart field 'file'".to_string()))?;
    let target_language = params
        .target_language
        .unwrap_or_else(|| state.default_target_language.clone());
    let split_threshold = params
        .split_threshold
        .unwrap_or(state.default_split_threshold);

    info!(%filename, %target_language, split_threshold, "translate request");

    let translated = state
        .subtitles
        .translate_file(&filename, &data, &target_language, split_threshold)
        .await
        .map_err(|e| {
            let context = format!(
                "Error communicating with translation backend ({})",
                state.subtitles.backend_name()
            );
            ApiError::backend(e, context)
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={TRANSLATED_FILENAME}"),
            ),
        ],
        translated,
    )
        .into_response())
}

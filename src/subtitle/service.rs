//! Subtitle translation pipeline.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::batch::{batch_text, partition, reassemble, split_translation};
use super::srt;
use crate::providers::TranslationProvider;
use crate::telemetry;
use crate::types::SubtitleEntry;
use crate::{Result, RtagsError};

/// Default target language code.
pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-cn";

/// Translates subtitle files through a [`TranslationProvider`].
///
/// Batches are translated one after another, in file order. The first
/// failing batch aborts the whole file; no partial output is produced.
#[derive(Clone)]
pub struct SubtitleTranslator {
    backend: Arc<dyn TranslationProvider>,
}

impl SubtitleTranslator {
    pub fn new(backend: Arc<dyn TranslationProvider>) -> Self {
        Self { backend }
    }

    /// Name of the underlying translation backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Translate an uploaded SRT file and return the translated SRT text.
    #[instrument(name = "subtitle.translate_file", skip(self, bytes), fields(size = bytes.len()))]
    pub async fn translate_file(
        &self,
        filename: &str,
        bytes: &[u8],
        target_language: &str,
        split_threshold: usize,
    ) -> Result<String> {
        if !srt::is_srt_filename(filename) {
            return Err(RtagsError::InvalidInput(
                "Only .srt files are supported".to_string(),
            ));
        }

        let text = std::str::from_utf8(bytes).map_err(|e| {
            RtagsError::InvalidInput(format!("Error parsing SRT file: not valid UTF-8: {e}"))
        })?;
        let entries = srt::parse(text).map_err(|e| match e {
            RtagsError::InvalidInput(msg) => {
                RtagsError::InvalidInput(format!("Error parsing SRT file: {msg}"))
            }
            other => other,
        })?;

        let translated = self
            .translate_entries(&entries, target_language, split_threshold)
            .await?;
        Ok(srt::compose(&translated))
    }

    /// Translate parsed entries, preserving their order and timings.
    pub async fn translate_entries(
        &self,
        entries: &[SubtitleEntry],
        target_language: &str,
        split_threshold: usize,
    ) -> Result<Vec<SubtitleEntry>> {
        let batches = partition(entries, split_threshold)?;
        info!(
            entries = entries.len(),
            batches = batches.len(),
            backend = self.backend.name(),
            target_language,
            "translating subtitles"
        );

        let mut lines = Vec::with_capacity(entries.len());
        for (batch_index, batch) in batches.iter().enumerate() {
            let translated = self.translate_batch(batch, target_language).await;
            let status = if translated.is_ok() { "ok" } else { "error" };
            metrics::counter!(
                telemetry::TRANSLATION_BATCHES_TOTAL,
                "backend" => self.backend.name().to_string(),
                "status" => status
            )
            .increment(1);

            let translated = translated?;
            debug!(batch = batch_index, lines = translated.len(), "batch translated");
            lines.extend(translated);
        }

        Ok(reassemble(entries, lines))
    }

    async fn translate_batch(
        &self,
        batch: &[SubtitleEntry],
        target_language: &str,
    ) -> Result<Vec<String>> {
        let blob = batch_text(batch);
        let translated = self.backend.translate(&blob, target_language).await?;
        split_translation(&translated, &blob)
    }
}

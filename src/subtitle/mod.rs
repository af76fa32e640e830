//! Subtitle translation: SRT codec, batching and the translation pipeline.
//!
//! Flow for one upload:
//!
//! ```text
//! bytes ─parse─▶ entries ─partition─▶ batches ─translate─▶ lines
//!       ─reassemble─▶ entries ─compose─▶ SRT
//! ```

pub mod batch;
mod service;
pub mod srt;

pub use batch::DEFAULT_SPLIT_THRESHOLD;
pub use service::{DEFAULT_TARGET_LANGUAGE, SubtitleTranslator};

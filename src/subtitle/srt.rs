//! SubRip (`.srt`) codec.
//!
//! A file is a sequence of blocks separated by blank lines:
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:02,500
//! Hello there.
//! ```
//!
//! Parsing is strict: a block without a numeric index or a valid timing
//! line is an error naming the offending block.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{SubtitleEntry, Timestamp};
use crate::{Result, RtagsError};

/// Timing line: `start --> end`, optionally followed by position hints.
static TIMING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+:\d{1,2}:\d{1,2}[,.]\d{1,3})\s*-->\s*(\d+:\d{1,2}:\d{1,2}[,.]\d{1,3})")
        .expect("timing regex is valid")
});

/// File extension accepted for uploads.
pub const SRT_EXTENSION: &str = ".srt";

/// Whether `filename` names an SRT file (case-insensitive).
pub fn is_srt_filename(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(SRT_EXTENSION)
}

/// Parse SRT text into entries, in file order.
pub fn parse(content: &str) -> Result<Vec<SubtitleEntry>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut entries = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                entries.push(parse_block(&block, entries.len() + 1)?);
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        entries.push(parse_block(&block, entries.len() + 1)?);
    }

    if entries.is_empty() {
        return Err(RtagsError::InvalidInput(
            "no subtitle entries found".to_string(),
        ));
    }
    Ok(entries)
}

fn parse_block(lines: &[&str], block_number: usize) -> Result<SubtitleEntry> {
    let invalid = |what: &str, found: &str| {
        RtagsError::InvalidInput(format!(
            "subtitle block {block_number}: expected {what}, found '{found}'"
        ))
    };

    let index_line = lines[0].trim();
    let index: usize = index_line
        .parse()
        .map_err(|_| invalid("a numeric index", index_line))?;

    let timing_line = lines.get(1).copied().unwrap_or_default();
    let caps = TIMING_REGEX
        .captures(timing_line)
        .ok_or_else(|| invalid("a timing line 'start --> end'", timing_line))?;
    let start: Timestamp = caps[1].parse()?;
    let end: Timestamp = caps[2].parse()?;

    let content = lines[2..]
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(SubtitleEntry::new(index, start, end, content))
}

/// Serialize entries to SRT text.
///
/// Blank lines inside an entry's content would end the block early, so
/// they are dropped.
pub fn compose(entries: &[SubtitleEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let content = entry
            .content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            entry.index, entry.start, entry.end, content
        ));
    }
    out
}

//! Batching and reassembly for line-preserving translation.
//!
//! A batch is a contiguous run of entries sent to the backend as one text
//! blob, one entry per line. The translated blob must come back with the
//! same number of lines; line `i` then belongs to entry `i` of the batch.

use crate::types::SubtitleEntry;
use crate::{Result, RtagsError};

/// Default number of entries per translation call.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 200;

/// Split entries into contiguous batches of at most `split_threshold`.
///
/// Returns a single batch when the input fits.
pub fn partition(
    entries: &[SubtitleEntry],
    split_threshold: usize,
) -> Result<Vec<&[SubtitleEntry]>> {
    if split_threshold == 0 {
        return Err(RtagsError::InvalidInput(
            "split_threshold must be at least 1".to_string(),
        ));
    }
    Ok(entries.chunks(split_threshold).collect())
}

/// Join a batch into one translation blob, one line per entry.
///
/// Line breaks inside an entry are folded into spaces so each entry
/// occupies exactly one line.
pub fn batch_text(batch: &[SubtitleEntry]) -> String {
    batch
        .iter()
        .map(|entry| entry.content.lines().map(str::trim).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a translated blob back into one line per line of `submitted`.
///
/// A single trailing newline is tolerated. Backends that trim their output
/// drop trailing lines that were empty on the way in; those are restored
/// as empty lines. Any other difference in line count is a
/// [`RtagsError::LineCountMismatch`].
pub fn split_translation(translated: &str, submitted: &str) -> Result<Vec<String>> {
    let submitted: Vec<&str> = submitted.split('\n').collect();
    let expected = submitted.len();

    let mut lines: Vec<String> = translated
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();

    if lines.len() == expected + 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    if lines.len() < expected && submitted[lines.len()..].iter().all(|l| l.trim().is_empty()) {
        lines.resize(expected, String::new());
    }

    if lines.len() != expected {
        return Err(RtagsError::LineCountMismatch {
            expected,
            actual: lines.len(),
        });
    }
    Ok(lines)
}

/// Build the output entries: original timings, translated text and
/// sequential 1-based indices.
///
/// `translated` holds one line per entry, in entry order.
pub fn reassemble(entries: &[SubtitleEntry], translated: Vec<String>) -> Vec<SubtitleEntry> {
    entries
        .iter()
        .zip(translated)
        .enumerate()
        .map(|(i, (original, content))| {
            SubtitleEntry::new(i + 1, original.start, original.end, content)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;

    fn entries(n: usize) -> Vec<SubtitleEntry> {
        (0..n)
            .map(|i| {
                let start = (i as u64) * 1_000;
                SubtitleEntry::new(
                    i + 1,
                    Timestamp::from_millis(start),
                    Timestamp::from_millis(start + 900),
                    format!("line {i}"),
                )
            })
            .collect()
    }

    #[test]
    fn partition_450_by_200() {
        let all = entries(450);
        let sizes: Vec<usize> = partition(&all, 200).unwrap().iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![200, 200, 50]);
    }

    #[test]
    fn partition_small_input_is_one_batch() {
        let all = entries(200);
        assert_eq!(partition(&all, 200).unwrap().len(), 1);
        let all = entries(3);
        assert_eq!(partition(&all, 200).unwrap().len(), 1);
    }

    #[test]
    fn partition_rejects_zero_threshold() {
        let err = partition(&entries(3), 0).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn batch_text_one_line_per_entry() {
        let mut batch = entries(2);
        batch[1].content = "two\nlines".to_string();
        assert_eq!(batch_text(&batch), "line 0\ntwo lines");
    }

    #[test]
    fn split_translation_exact() {
        assert_eq!(split_translation("a\nb", "x\ny").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn split_translation_tolerates_trailing_newline_and_crlf() {
        assert_eq!(split_translation("a\r\nb\n", "x\ny").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn split_translation_keeps_empty_lines() {
        assert_eq!(split_translation("a\n\nc", "x\ny\nz").unwrap(), vec!["a", "", "c"]);
    }

    #[test]
    fn split_translation_restores_trimmed_empty_tail() {
        assert_eq!(split_translation("a", "x\n").unwrap(), vec!["a", ""]);
        assert_eq!(split_translation("a", "x\n\n ").unwrap(), vec!["a", "", ""]);
        assert_eq!(split_translation("", "\n").unwrap(), vec!["", ""]);
    }

    #[test]
    fn split_translation_short_by_real_text_is_mismatch() {
        let err = split_translation("a", "x\ny").unwrap_err();
        assert!(matches!(
            err,
            RtagsError::LineCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn split_translation_mismatch() {
        let err = split_translation("a b", "x\ny").unwrap_err();
        assert!(matches!(
            err,
            RtagsError::LineCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn reassemble_keeps_timings_and_renumbers() {
        let mut original = entries(3);
        original[0].index = 7;
        let out = reassemble(&original, vec!["x".into(), "y".into(), "z".into()]);
        assert_eq!(out.len(), 3);
        for (i, entry) in out.iter().enumerate() {
            assert_eq!(entry.index, i + 1);
            assert_eq!(entry.start, original[i].start);
            assert_eq!(entry.end, original[i].end);
        }
        assert_eq!(out[2].content, "z");
    }
}

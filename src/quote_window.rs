/*!
 * Quotation building around matched times.
 *
 * Short paragraphs are quoted whole. Long ones are split into sentences once
 * and each match gets the sentences around the one containing it.
 */

use log::debug;

use crate::sentence_splitter::split_sentences;

/// Sentences taken on each side of the matching sentence
pub const DEFAULT_WINDOW_RADIUS: usize = 3;

/// Paragraphs longer than this many characters are windowed instead of quoted whole
pub const DEFAULT_LONG_PARAGRAPH_THRESHOLD: usize = 500;

/// A contiguous run of sentence indices, `start..end` (end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteWindow {
    pub start: usize,
    pub end: usize,
}

impl QuoteWindow {
    /// Window of `radius` sentences either side of `index` in a sequence of `len`.
    ///
    /// The upper bound is clamped to the last index and then made exclusive by
    /// adding one, so the window never runs past the sequence.
    pub fn around(index: usize, len: usize, radius: usize) -> Self {
        if len == 0 {
            return Self { start: 0, end: 0 };
        }
        let start = index.saturating_sub(radius);
        let reach = index.saturating_add(radius);
        let upper = if reach > len { len - 1 } else { reach };
        let end = (upper + 1).min(len);
        Self { start, end }
    }

    /// Number of sentences covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join the covered sentences with single spaces
    pub fn join(&self, sentences: &[String]) -> String {
        sentences[self.start..self.end].join(" ")
    }
}

/// Index of the first sentence containing `needle`
pub fn sentence_index(sentences: &[String], needle: &str) -> Option<usize> {
    sentences.iter().position(|s| s.contains(needle))
}

/// One quotation per match, built from the sentences around each match
pub fn extract_quotes(text: &str, matches: &[String]) -> Vec<String> {
    extract_quotes_with_radius(text, matches, DEFAULT_WINDOW_RADIUS)
}

/// Find the sentence holding a match, retrying without a trailing period.
///
/// A match such as `9:00 PM.` takes the sentence's own period, which the
/// splitter may move behind a closing quote (`PM".`).
fn locate_match(sentences: &[String], needle: &str) -> Option<usize> {
    sentence_index(sentences, needle).or_else(|| {
        let trimmed = needle.trim_end_matches('.');
        if trimmed.len() < needle.len() {
            sentence_index(sentences, trimmed)
        } else {
            None
        }
    })
}

/// [`extract_quotes`] with a custom window radius.
///
/// A match that no sentence contains (for instance one spanning a newline the
/// splitter collapsed) yields an empty quotation.
pub fn extract_quotes_with_radius(text: &str, matches: &[String], radius: usize) -> Vec<String> {
    let sentences = split_sentences(text);

    matches
        .iter()
        .map(|m| match locate_match(&sentences, m) {
            Some(index) => QuoteWindow::around(index, sentences.len(), radius).join(&sentences),
            None => {
                debug!("Time '{}' not found in any of {} sentences", m, sentences.len());
                String::new()
            }
        })
        .collect()
}

/// Whether a paragraph is long enough to be windowed rather than quoted whole
pub fn is_long_paragraph(text: &str, threshold: usize) -> bool {
    text.chars().count() > threshold
}

/// Quotations for every match in a paragraph, choosing the whole-paragraph or
/// windowed path by length
pub fn quotes_for_paragraph(
    text: &str,
    matches: &[String],
    threshold: usize,
    radius: usize,
) -> Vec<String> {
    if matches.is_empty() {
        return Vec::new();
    }
    if is_long_paragraph(text, threshold) {
        extract_quotes_with_radius(text, matches, radius)
    } else {
        vec![text.to_string(); matches.len()]
    }
}

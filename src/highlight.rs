// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippets with highlighted matches.
//!
//! Turns a field's text plus a handful of match spans into an ordered list of
//! plain and marked segments the UI can render directly. Long fields are cut
//! to a window around the *first* match; a cut is shown with `...`.
//!
//! # Guarantees
//!
//! - Invalid spans (empty, or running past the text) are dropped, not errors.
//! - Overlapping spans are merged before rendering, so marked segments never
//!   repeat text.
//! - No segment leaves the window, and stripping the ellipses from the
//!   concatenated segments gives back exactly `text[window]`.
//!
//! All offsets are character offsets.

use crate::types::{MatchPosition, Segment, ELLIPSIS};

/// Character-indexed view over a `&str`.
struct CharText<'a> {
    text: &'a str,
    /// Byte offset of every char, plus `text.len()` as a sentinel.
    bounds: Vec<usize>,
}

impl<'a> CharText<'a> {
    fn new(text: &'a str) -> Self {
        let bounds = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, bounds }
    }

    fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bounds[start]..self.bounds[end]]
    }
}

/// Split `text` into plain/marked segments around `positions`.
///
/// `snippet_length` bounds the displayed text: with no usable positions it is
/// the length of the leading excerpt; otherwise, when the text is longer than
/// `snippet_length`, the window spans `snippet_length` characters either side
/// of the first match. A `snippet_length` of zero disables windowing for
/// matched text.
pub fn build_highlighted(text: &str, positions: &[MatchPosition], snippet_length: usize) -> Vec<Segment> {
    let chars = CharText::new(text);
    let text_len = chars.len();

    let mut valid: Vec<MatchPosition> = positions
        .iter()
        .copied()
        .filter(|p| p.is_valid_for(text_len))
        .collect();

    if valid.is_empty() {
        let take = snippet_length.min(text_len);
        let mut excerpt = chars.slice(0, take).to_string();
        if snippet_length < text_len {
            excerpt.push_str(ELLIPSIS);
        }
        return vec![Segment::plain(excerpt)];
    }

    valid.sort();
    let spans = merge_overlapping(&valid);
    let first = spans[0];

    let (window_start, window_end) = if snippet_length > 0 && text_len > snippet_length {
        (
            first.start.saturating_sub(snippet_length),
            (first.end() + snippet_length).min(text_len),
        )
    } else {
        (0, text_len)
    };

    let mut segments = Vec::new();
    if first.start > window_start {
        let lead = if window_start > 0 { ELLIPSIS } else { "" };
        segments.push(Segment::plain(format!(
            "{}{}",
            lead,
            chars.slice(window_start, first.start)
        )));
    }

    let mut last_end = first.start;
    for span in spans
        .iter()
        .filter(|p| p.start >= window_start && p.end() <= window_end)
    {
        if span.start > last_end {
            segments.push(Segment::plain(chars.slice(last_end, span.start)));
        }
        segments.push(Segment::marked(chars.slice(span.start, span.end())));
        last_end = span.end();
    }

    let tail = if window_end < text_len { ELLIPSIS } else { "" };
    if last_end < window_end || !tail.is_empty() {
        segments.push(Segment::plain(format!(
            "{}{}",
            chars.slice(last_end, window_end),
            tail
        )));
    }

    segments
}

/// Merge spans that share at least one character. Input must be sorted by start.
fn merge_overlapping(sorted: &[MatchPosition]) -> Vec<MatchPosition> {
    let mut merged: Vec<MatchPosition> = Vec::with_capacity(sorted.len());
    for &span in sorted {
        match merged.last_mut() {
            Some(last) if span.start < last.end() => {
                let end = last.end().max(span.end());
                last.length = end - last.start;
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Locate `term` in `text`, case-insensitively.
///
/// Returns the first occurrence, extended to the end of the word it sits in
/// (up to the next `.`, `,` or whitespace). `None` when the term does not occur
/// or the span would be empty.
pub fn find_term_position(term: &str, text: &str) -> Option<MatchPosition> {
    let needle: Vec<char> = term.chars().map(fold_char).collect();
    if needle.is_empty() {
        return None;
    }
    let haystack: Vec<char> = text.chars().map(fold_char).collect();
    if needle.len() > haystack.len() {
        return None;
    }

    let start = haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;
    let length = haystack[start..]
        .iter()
        .take_while(|c| !(**c == '.' || **c == ',' || c.is_whitespace()))
        .count();

    (length > 0).then_some(MatchPosition::new(start, length))
}

/// Positions of every term found in `text`, sorted by start.
pub fn term_positions<'t>(text: &str, terms: impl IntoIterator<Item = &'t str>) -> Vec<MatchPosition> {
    let mut positions: Vec<MatchPosition> = terms
        .into_iter()
        .filter_map(|term| find_term_position(term, text))
        .collect();
    positions.sort();
    positions
}

/// One-to-one lowercase so character offsets survive folding.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

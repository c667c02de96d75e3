// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Normalization and tokenization.
//!
//! Indexed words and query terms must land in the same form or nothing
//! matches. `normalize` is that form: lowercase, diacritics stripped,
//! whitespace collapsed. `tokenize` splits field text into terms the way the
//! reference oracle indexes them and remembers where each one came from, in
//! character offsets of the original text.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::types::MatchPosition;

/// Normalize a string for search: lowercase, strip diacritics, and collapse whitespace.
///
/// - "café" → "cafe"
/// - "harīṣh" → "harish"
/// - "  Quick   Fox " → "quick fox"
///
/// Without the `unicode-normalization` feature this only lowercases and
/// collapses whitespace.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combining marks (Unicode category Mn) for the scripts we expect to see.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Term separators: whitespace and hyphens.
#[inline]
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip non-word characters from both ends of a token.
pub fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !is_word_char(c))
}

/// A normalized term and the span it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub position: MatchPosition,
}

/// Split `text` on separators, trim each piece and normalize it.
///
/// Pieces that trim to nothing are skipped. Positions are the trimmed span
/// in the original text, counted in characters.
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && is_separator(chars[i]) {
            i += 1;
        }
        let mut start = i;
        while i < chars.len() && !is_separator(chars[i]) {
            i += 1;
        }
        let mut end = i;

        while start < end && !is_word_char(chars[start]) {
            start += 1;
        }
        while end > start && !is_word_char(chars[end - 1]) {
            end -= 1;
        }
        if start == end {
            continue;
        }

        let raw: String = chars[start..end].iter().collect();
        let term = normalize(&raw);
        if !term.is_empty() {
            tokens.push(Token {
                term,
                position: MatchPosition::new(start, end - start),
            });
        }
    }

    tokens
}

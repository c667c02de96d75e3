// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snippet highlighting.
//!
//! Arbitrary text, arbitrary spans (most of them invalid), arbitrary window.
//! The highlighter must never panic on a char boundary, and what it returns
//! must read back as one piece of the input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleuth::types::{MatchPosition, ELLIPSIS};
use sleuth::build_highlighted;

#[derive(Debug, Arbitrary)]
struct HighlightInput {
    text: String,
    spans: Vec<(u16, u8)>,
    snippet_length: u8,
}

fuzz_target!(|input: HighlightInput| {
    // Ellipses inside the text would make the read-back ambiguous.
    if input.text.contains('.') {
        return;
    }
    let positions: Vec<MatchPosition> = input
        .spans
        .iter()
        .take(16)
        .map(|&(start, length)| MatchPosition::new(start as usize, length as usize))
        .collect();

    let segments = build_highlighted(&input.text, &positions, input.snippet_length as usize);
    assert!(!segments.is_empty());

    let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
    let inner = joined.strip_prefix(ELLIPSIS).unwrap_or(&joined);
    let inner = inner.strip_suffix(ELLIPSIS).unwrap_or(inner);
    assert!(input.text.contains(inner), "{:?} not in {:?}", inner, input.text);

    for segment in segments.iter().filter(|s| s.is_marked()) {
        assert!(!segment.text.is_empty());
    }
});

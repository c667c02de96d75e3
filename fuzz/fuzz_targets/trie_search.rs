// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for trie fuzzy search.
//!
//! Every returned word must be one that was inserted, within the budget, and
//! reported with its true distance. Every inserted word within the budget
//! must come back.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleuth::fuzzy::TrieBuilder;
use sleuth::levenshtein;

#[derive(Debug, Arbitrary)]
struct TrieInput {
    words: Vec<String>,
    query: String,
    max_distance: u8,
}

fuzz_target!(|input: TrieInput| {
    // Cap sizes to avoid timeouts
    let words: Vec<String> = input
        .words
        .into_iter()
        .take(64)
        .filter(|w| !w.is_empty() && w.chars().count() <= 12)
        .collect();
    if input.query.chars().count() > 12 {
        return;
    }
    let max = (input.max_distance % 4) as usize;

    let mut builder = TrieBuilder::new();
    for (i, word) in words.iter().enumerate() {
        builder.insert(word, i);
    }
    let trie = builder.build();

    let matches = trie.fuzzy_search(&input.query, max);
    for m in &matches {
        assert!(words.contains(&m.word));
        assert_eq!(m.distance, levenshtein(&m.word, &input.query));
        assert!(m.distance <= max);
    }
    for word in &words {
        if levenshtein(word, &input.query) <= max {
            assert!(matches.iter().any(|m| &m.word == word), "missed {:?}", word);
        }
    }
});

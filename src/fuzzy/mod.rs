// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! Two pieces here: the edit distance functions, and a character trie that
//! walks its words with an edit budget so a misspelled query still finds the
//! documents it meant.

mod levenshtein;
pub mod trie;

pub use levenshtein::*;
pub use trie::{collect_payloads, FuzzyMatch, Trie, TrieBuilder, TrieNode, TrieStats};

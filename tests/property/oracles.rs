//! Reference oracles for differential testing.
//!
//! Simple, obviously-correct implementations. Slow on purpose: each one is a
//! direct transcription of the definition, so a disagreement points at the
//! optimized code.

#![allow(dead_code)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use sleuth::store::Document;
use sleuth::util::tokenize;

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

/// Classic Levenshtein edit distance via a full Wagner-Fischer table.
pub fn oracle_levenshtein(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        table[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }
    table[a.len()][b.len()]
}

/// Every vocabulary word within `max` edits of `query`, with its distance.
pub fn oracle_fuzzy(vocabulary: &[String], query: &str, max: usize) -> BTreeSet<(String, usize)> {
    vocabulary
        .iter()
        .map(|w| (w.clone(), oracle_levenshtein(w, query)))
        .filter(|(_, d)| *d <= max)
        .collect()
}

/// Documents with `term` among their tokens in any indexed field.
pub fn oracle_term_docs(docs: &[Document], term: &str) -> BTreeSet<u32> {
    docs.iter()
        .filter(|doc| {
            [doc.title.as_str(), doc.text.as_str()]
                .into_iter()
                .flat_map(tokenize)
                .any(|token| token.term == term)
        })
        .map(|doc| doc.id.get())
        .collect()
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// Short words over a small alphabet, so near misses are common.
pub fn small_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abcd]{1,6}").unwrap()
}

pub fn vocabulary() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(small_word(), 1..30).prop_map(|set| set.into_iter().collect())
}

/// Sentence-like text without `.` so ellipses in snippets are unambiguous.
pub fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[a-zA-Zé]{1,8}").unwrap(), 0..20)
        .prop_map(|words| words.join(" "))
}

// =============================================================================
// ORACLE SELF-CHECKS
// =============================================================================

#[test]
fn test_oracle_levenshtein_known_values() {
    assert_eq!(oracle_levenshtein("kitten", "sitting"), 3);
    assert_eq!(oracle_levenshtein("", "abc"), 3);
    assert_eq!(oracle_levenshtein("search", "starch"), 1);
    assert_eq!(oracle_levenshtein("search", "scratch"), 3);
    assert_eq!(oracle_levenshtein("flaw", "lawn"), 2);
}

#[test]
fn test_oracle_fuzzy_known_values() {
    let vocab: Vec<String> = ["search", "starch", "scratch"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let found: Vec<String> = oracle_fuzzy(&vocab, "search", 2)
        .into_iter()
        .map(|(w, _)| w)
        .collect();
    assert_eq!(found, vec!["search", "starch"]);
}

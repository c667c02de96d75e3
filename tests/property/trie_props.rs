//! Trie fuzzy search against a brute-force scan of the vocabulary.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sleuth::fuzzy::{collect_payloads, Trie, TrieBuilder};

use super::oracles::{oracle_fuzzy, small_word, vocabulary};

/// Word `i` of the vocabulary carries payload `i`.
fn build(vocab: &[String]) -> Trie<usize> {
    let mut builder = TrieBuilder::new();
    for (i, word) in vocab.iter().enumerate() {
        builder.insert(word, i);
    }
    builder.build()
}

proptest! {
    #[test]
    fn prop_fuzzy_search_equals_brute_force(
        vocab in vocabulary(),
        query in small_word(),
        max in 0usize..=3,
    ) {
        let trie = build(&vocab);
        let found: BTreeSet<(String, usize)> = trie
            .fuzzy_search(&query, max)
            .into_iter()
            .map(|m| (m.word, m.distance))
            .collect();
        prop_assert_eq!(found, oracle_fuzzy(&vocab, &query, max));
    }

    #[test]
    fn prop_no_duplicate_words(vocab in vocabulary(), query in small_word(), max in 0usize..=3) {
        let trie = build(&vocab);
        let matches = trie.fuzzy_search(&query, max);
        let distinct: BTreeSet<&str> = matches.iter().map(|m| m.word.as_str()).collect();
        prop_assert_eq!(distinct.len(), matches.len());
    }

    #[test]
    fn prop_sorted_by_distance_then_word(vocab in vocabulary(), query in small_word()) {
        let trie = build(&vocab);
        let keys: Vec<(usize, String)> = trie
            .fuzzy_search(&query, 3)
            .into_iter()
            .map(|m| (m.distance, m.word))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn prop_exact_lookup_returns_own_payload(vocab in vocabulary()) {
        let trie = build(&vocab);
        for (i, word) in vocab.iter().enumerate() {
            let matches = trie.fuzzy_search(word, 0);
            prop_assert_eq!(matches.len(), 1);
            prop_assert_eq!(&matches[0].word, word);
            prop_assert_eq!(matches[0].payloads, &[i][..]);
        }
    }

    #[test]
    fn prop_payloads_cover_every_match(vocab in vocabulary(), query in small_word()) {
        let trie = build(&vocab);
        let matches = trie.fuzzy_search(&query, 2);
        let payloads: BTreeSet<usize> = collect_payloads(&matches).into_iter().collect();
        let expected: BTreeSet<usize> = vocab
            .iter()
            .enumerate()
            .filter(|(_, w)| matches.iter().any(|m| &m.word == *w))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(payloads, expected);
    }
}

#[test]
fn test_search_example() {
    let vocab: Vec<String> = ["search", "starch", "scratch"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let trie = build(&vocab);
    let words: Vec<String> = trie
        .fuzzy_search("search", 1)
        .into_iter()
        .map(|m| m.word)
        .collect();
    assert_eq!(words, vec!["search", "starch"]);
}

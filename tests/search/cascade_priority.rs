//! Exact, then prefix, then substring: the first stage with hits wins.

use sleuth::search::{CascadeStage, HitSource};
use sleuth::SearchConfig;

use super::common::{docs_store, searcher_for};

fn source_of(query: &str) -> Option<(HitSource, CascadeStage)> {
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    searcher.ranked_hits(query, None).unwrap().source
}

fn ids_of(query: &str) -> Vec<u32> {
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    searcher
        .ranked_hits(query, None)
        .unwrap()
        .hits
        .iter()
        .map(|hit| hit.doc_ref.doc_id.get())
        .collect()
}

#[test]
fn test_exact_term() {
    assert_eq!(
        source_of("indexer"),
        Some((HitSource::Scoped, CascadeStage::Exact))
    );
    assert_eq!(ids_of("indexer"), vec![1, 2, 4]);
}

#[test]
fn test_prefix_when_nothing_exact() {
    // No indexed word is within three edits of "config", so the full index answers.
    assert_eq!(
        source_of("config"),
        Some((HitSource::Full, CascadeStage::Prefix))
    );
    assert_eq!(ids_of("config"), vec![2]);
}

#[test]
fn test_substring_last() {
    assert_eq!(
        source_of("ighlight"),
        Some((HitSource::Full, CascadeStage::Substring))
    );
    assert_eq!(ids_of("ighlight"), vec![4]);
}

#[test]
fn test_nothing_anywhere() {
    assert_eq!(source_of("zzzzqqq"), None);
    assert!(ids_of("zzzzqqq").is_empty());
}

#[test]
fn test_explicit_fuzzy_term_reaches_typos() {
    // The trie scopes but does not rewrite the query; `~1` asks the index itself.
    assert!(ids_of("indexr").is_empty());
    assert_eq!(ids_of("indexr~1"), vec![1, 2, 4]);
}

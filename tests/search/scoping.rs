//! The trie's candidates decide which documents the oracle sees first.

use sleuth::build::build_trie;
use sleuth::search::{CascadeStage, HitSource};
use sleuth::testing::RecordingOracle;
use sleuth::types::DocId;
use sleuth::{SearchConfig, Searcher};

use super::common::{docs_store, searcher_for};

#[test]
fn test_candidates_tolerate_typos() {
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    let mut candidates = searcher.candidates("indexr");
    candidates.sort();
    assert_eq!(candidates, vec![DocId(1), DocId(2), DocId(4)]);
}

#[test]
fn test_whole_query_matches_joined_identifier() {
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    assert_eq!(searcher.candidates("snake case"), vec![DocId(3)]);

    let ranked = searcher.ranked_hits("snake case", None).unwrap();
    assert_eq!(ranked.source, Some((HitSource::Scoped, CascadeStage::Exact)));
    assert_eq!(ranked.hits.len(), 1);
    assert_eq!(ranked.hits[0].doc_ref.doc_id, DocId(3));
}

#[test]
fn test_zero_budget_needs_exact_words() {
    let config = SearchConfig::default().with_max_edit_distance(0);
    let searcher = searcher_for(docs_store(), config);
    assert!(searcher.candidates("indexr").is_empty());
    assert_eq!(searcher.candidates("indexer").len(), 3);
}

#[test]
fn test_candidates_are_normalized() {
    let searcher = searcher_for(docs_store(), SearchConfig::default().with_max_edit_distance(0));
    assert_eq!(searcher.candidates("GLOSSARY"), vec![DocId(5)]);
}

#[test]
fn test_scoped_hits_only_from_candidates() {
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    let ranked = searcher.ranked_hits("snippet", None).unwrap();
    assert_eq!(ranked.candidates, vec![DocId(5)]);
    assert_eq!(ranked.source.map(|(source, _)| source), Some(HitSource::Scoped));
    assert!(ranked.hits.iter().all(|hit| hit.doc_ref.doc_id == DocId(5)));
}

#[test]
fn test_joined_rerun_answers_when_everything_else_is_empty() {
    let store = docs_store();
    let searcher = Searcher::new(
        RecordingOracle::answering(&["snake_case"]),
        build_trie(&store),
        store,
        SearchConfig::default(),
    );

    let ranked = searcher.ranked_hits("snake case", None).unwrap();
    assert_eq!(ranked.source, Some((HitSource::Joined, CascadeStage::Exact)));
    assert_eq!(ranked.hits.len(), 1);

    let seen = searcher.oracle().seen();
    assert!(seen.iter().any(|q| q.starts_with("[scoped 3] ")));
    assert_eq!(seen.last().map(String::as_str), Some("snake_case"));
}

#[test]
fn test_no_joined_rerun_for_single_words() {
    let store = docs_store();
    let searcher = Searcher::new(
        RecordingOracle::answering(&["snake_case"]),
        build_trie(&store),
        store,
        SearchConfig::default(),
    );
    let ranked = searcher.ranked_hits("snake", None).unwrap();
    assert_eq!(ranked.source, None);
    assert!(!searcher.oracle().seen().contains(&"snake_case".to_string()));
}

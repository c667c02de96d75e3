//! Facet filters apply inside every cascade stage.

use sleuth::search::CascadeStage;
use sleuth::store::FacetFilter;
use sleuth::{SearchConfig, SearchOutcome};

use super::common::{docs_store, searcher_for};

fn ids(query: &str, facet: &str) -> Vec<u32> {
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    let facet: FacetFilter = facet.parse().unwrap();
    searcher
        .search(query, Some(&facet))
        .items()
        .iter()
        .map(|item| item.doc_ref.doc_id.get())
        .collect()
}

#[test]
fn test_extra_attribute() {
    assert_eq!(ids("indexer", "audience:ops"), vec![4]);
}

#[test]
fn test_builtin_attribute() {
    assert_eq!(ids("indexer", "component:guide"), vec![1, 2]);
    assert_eq!(ids("indexer", "version:1.4"), vec![4]);
}

#[test]
fn test_everything_filtered_is_no_results() {
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    let facet = FacetFilter::new("audience", "dev");
    assert_eq!(
        searcher.search("indexer", Some(&facet)),
        SearchOutcome::NoResults {
            query: "indexer".into()
        }
    );
}

#[test]
fn test_filtered_stage_falls_through() {
    // "in" is an exact word only in doc 3; the facet rejects it, so the
    // prefix stage runs and finds "indexer" in doc 4.
    let searcher = searcher_for(docs_store(), SearchConfig::default());
    let facet = FacetFilter::new("audience", "ops");
    let ranked = searcher.ranked_hits("in", Some(&facet)).unwrap();
    assert_eq!(ranked.source.map(|(_, stage)| stage), Some(CascadeStage::Prefix));
    assert_eq!(ids("in", "audience:ops"), vec![4]);
}

#[test]
fn test_filter_applies_to_every_stage() {
    assert!(ids("api", "component:guide").is_empty());
}

#[test]
fn test_facet_syntax() {
    assert!("audience".parse::<FacetFilter>().is_err());
    assert!(":ops".parse::<FacetFilter>().is_err());
    assert_eq!(
        "audience:ops".parse::<FacetFilter>().unwrap(),
        FacetFilter::new("audience", "ops")
    );
}

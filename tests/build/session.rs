//! A session over payloads read back from disk.

use std::fs;

use sleuth::payload::PayloadKind;
use sleuth::{LoadState, SearchConfig, SearchSession, SessionError};
use tempfile::TempDir;

use super::common::{build_into, docs_store};

fn built() -> (TempDir, Vec<u8>, Vec<u8>) {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    build_into(temp.path(), &out, &docs_store());
    let index = fs::read(out.join(PayloadKind::Index.file_name())).unwrap();
    let trie = fs::read(out.join(PayloadKind::Trie.file_name())).unwrap();
    (temp, index, trie)
}

#[test]
fn test_search_after_load() {
    let (_temp, index, trie) = built();
    let mut session: SearchSession = SearchSession::new(SearchConfig::default());
    let report = session.load(&index, &trie).unwrap();
    assert_eq!(report.documents, 5);
    assert_eq!(session.state(), LoadState::Ready);

    let outcome = session.search("glossary", None).unwrap();
    assert_eq!(outcome.items()[0].url, "/glossary.html");
}

#[test]
fn test_queries_rejected_until_ready() {
    let (_temp, index, trie) = built();
    let mut session: SearchSession = SearchSession::default();
    assert_eq!(session.search("glossary", None), Err(SessionError::Loading));

    let truncated = &trie[..trie.len() - 1];
    assert!(session.load(&index, truncated).is_err());
    assert!(matches!(
        session.search("glossary", None),
        Err(SessionError::Failed(_))
    ));

    session.load(&index, &trie).unwrap();
    assert!(session.search("glossary", None).is_ok());
}

#[test]
fn test_searchers_share_across_threads() {
    let (_temp, index, trie) = built();
    let mut session: SearchSession = SearchSession::default();
    session.load(&index, &trie).unwrap();
    let searcher = session.searcher().unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["indexer", "glossary", "snippet"]
            .into_iter()
            .map(|query| scope.spawn(move || searcher.search(query, None).items().len()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap() > 0);
        }
    });
}

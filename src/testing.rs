// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::build::{build_index, build_payloads, build_trie};
use crate::config::SearchConfig;
use crate::error::OracleError;
use crate::oracle::{default_fields, Hit, MatchData, MemoryIndex, Query, RankedOracle};
use crate::search::Searcher;
use crate::store::{ComponentVersion, Document, DocumentStore, SectionTitle};
use crate::types::{DocId, DocRef};

/// Create a simple test document with a title and body.
pub fn make_doc(id: u32, title: &str, text: &str) -> Document {
    let mut doc = Document::new(id, title, format!("/doc/{}.html", id));
    doc.text = text.to_string();
    doc
}

/// Three documents across two components, one with a section title.
///
/// - 7: "Trie Search" in core/1.0, section 2 "Fuzzy lookup"
/// - 9: "Highlighting" in ui/2.1
/// - 11: "Installing", no component, `audience: ops`
pub fn fixture_store() -> DocumentStore {
    let mut trie = Document::new(7, "Trie Search", "/trie.html");
    trie.component = Some("core".into());
    trie.version = Some("1.0".into());
    trie.keyword = Some("data-structure".into());
    trie.text = "A trie answers fuzzy search queries with a bounded edit budget.".into();
    trie.titles = vec![SectionTitle {
        id: 2,
        hash: "fuzzy-lookup".into(),
        text: "Fuzzy lookup".into(),
    }];

    let mut highlight = Document::new(9, "Highlighting", "/highlight.html");
    highlight.component = Some("ui".into());
    highlight.version = Some("2.1".into());
    highlight.text = "Snippets mark every match. Search results show highlighted text.".into();

    let mut install = Document::new(11, "Installing", "/install.html");
    install.text = "Install the command line tool with cargo.".into();
    install
        .extra
        .insert("audience".into(), serde_json::Value::String("ops".into()));

    let mut store = DocumentStore::new();
    store.insert(trie);
    store.insert(highlight);
    store.insert(install);
    store.component_versions.insert(
        "core/1.0".into(),
        ComponentVersion {
            title: "Core".into(),
            display_version: Some("1.0".into()),
        },
    );
    store.component_versions.insert(
        "ui/2.1".into(),
        ComponentVersion {
            title: "UI".into(),
            display_version: None,
        },
    );
    store
}

pub fn fixture_config() -> SearchConfig {
    SearchConfig::default().with_site_root_path("/docs")
}

/// Searcher over [`fixture_store`] with the default field configuration.
pub fn fixture_searcher() -> Searcher<MemoryIndex> {
    searcher_for(fixture_store(), fixture_config())
}

pub fn searcher_for(store: DocumentStore, config: SearchConfig) -> Searcher<MemoryIndex> {
    let index = build_index(&store, default_fields());
    let trie = build_trie(&store);
    Searcher::new(index, trie, store, config)
}

/// Encoded (index, trie) payloads of [`fixture_store`].
pub fn fixture_payloads() -> (Vec<u8>, Vec<u8>) {
    build_payloads(fixture_store(), default_fields()).expect("fixture store encodes")
}

// =============================================================================
// RECORDING ORACLE
// =============================================================================

/// Oracle that logs every query it sees and answers only the ones it was told to.
///
/// Queries are logged as their clause terms joined by spaces. A scoped copy
/// shares the log and prefixes its entries with `[scoped <ids>] `; it answers
/// with its documents, the root with ref `1`.
#[derive(Debug, Clone)]
pub struct RecordingOracle {
    answers: Vec<String>,
    refs: Vec<DocRef>,
    label: String,
    log: Rc<RefCell<Vec<String>>>,
}

impl RecordingOracle {
    pub fn answering(queries: &[&str]) -> Self {
        Self {
            answers: queries.iter().map(|q| q.to_string()).collect(),
            refs: vec![DocRef::document(DocId(1))],
            label: String::new(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl RankedOracle for RecordingOracle {
    fn query(&self, query: &Query) -> Result<Vec<Hit>, OracleError> {
        let text = query
            .clauses
            .iter()
            .map(|c| c.term.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.log.borrow_mut().push(format!("{}{}", self.label, text));

        if !self.answers.contains(&text) {
            return Ok(Vec::new());
        }
        Ok(self
            .refs
            .iter()
            .map(|&doc_ref| Hit {
                doc_ref,
                score: 1.0,
                match_data: MatchData::new(),
            })
            .collect())
    }

    fn scoped(&self, documents: &[&Document]) -> Self {
        let ids: Vec<String> = documents.iter().map(|d| d.id.to_string()).collect();
        Self {
            answers: self.answers.clone(),
            refs: documents.iter().map(|d| DocRef::document(d.id)).collect(),
            label: format!("[scoped {}] ", ids.join(",")),
            log: Rc::clone(&self.log),
        }
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typo-tolerant offline search.
//!
//! A character trie of every indexed word sits in front of a ranked term
//! index. The trie tolerates typos (bounded edit distance) and narrows the
//! corpus; the index ranks; the highlighter cuts display snippets around the
//! matched terms.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │    build     │────▶│   payload    │────▶│   session    │
//! │ (documents → │     │ (brotli JSON │     │ (Loading →   │
//! │  trie+index) │     │  + CRC footer)│    │  Ready)      │
//! └──────────────┘     └──────────────┘     └──────┬───────┘
//!                                                  ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ fuzzy::Trie  │────▶│search::Searcher│──▶│  highlight   │
//! │ (candidates) │     │ (scoped/full │     │  (segments)  │
//! └──────────────┘     │  cascade)    │     └──────────────┘
//!                      └──────┬───────┘
//!                             ▼
//!                   ┌────────────────────┐
//!                   │ oracle::RankedOracle│
//!                   │ (MemoryIndex)       │
//!                   └────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use sleuth::build::{build_index, build_trie};
//! use sleuth::oracle::default_fields;
//! use sleuth::store::{Document, DocumentStore};
//! use sleuth::{SearchConfig, Searcher};
//!
//! let mut doc = Document::new(1, "Trie Search", "/trie.html");
//! doc.text = "A trie answers fuzzy search queries.".into();
//! let mut store = DocumentStore::new();
//! store.insert(doc);
//!
//! let searcher = Searcher::new(
//!     build_index(&store, default_fields()),
//!     build_trie(&store),
//!     store,
//!     SearchConfig::default(),
//! );
//! assert_eq!(searcher.search("queries", None).items().len(), 1);
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod highlight;
pub mod oracle;
pub mod payload;
pub mod search;
pub mod session;
pub mod store;
pub mod types;
pub mod util;

// Test utilities (hidden from docs, used by tests, benches and fuzz targets)
pub mod testing;

pub use config::SearchConfig;
pub use error::{BuildError, LoadError, OracleError, QueryParseError, SearchError, SessionError};
pub use fuzzy::{levenshtein, levenshtein_within, Trie, TrieBuilder};
pub use highlight::build_highlighted;
pub use oracle::{MemoryIndex, Query, RankedOracle};
pub use search::{SearchOutcome, Searcher};
pub use session::{LoadState, SearchSession};
pub use store::{Document, DocumentStore, FacetFilter};
pub use types::{DocId, DocRef, MatchPosition, Segment, SegmentKind};

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Load lifecycle: `Loading` → `Ready` | `Failed`.
//!
//! A session owns nothing until both payloads decode. Queries before that are
//! rejected with [`SessionError`] rather than silently answered from an empty
//! index. A failed load can be retried with new bytes; a successful reload
//! replaces the searcher wholesale.

use std::time::{Duration, Instant};

use log::{error, info};
use serde::de::DeserializeOwned;

use crate::config::SearchConfig;
use crate::error::{LoadError, SessionError};
use crate::fuzzy::Trie;
use crate::oracle::{MemoryIndex, RankedOracle};
use crate::payload::{decode, IndexPayload, PayloadKind};
use crate::search::{SearchOutcome, Searcher};
use crate::store::FacetFilter;
use crate::types::DocId;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug)]
enum State<O> {
    Loading,
    Ready(Box<Searcher<O>>),
    Failed(String),
}

/// What a successful load produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub documents: usize,
    pub took: Duration,
}

#[derive(Debug)]
pub struct SearchSession<O = MemoryIndex> {
    state: State<O>,
    config: SearchConfig,
}

impl<O> Default for SearchSession<O> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<O> SearchSession<O> {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            state: State::Loading,
            config,
        }
    }

    pub fn state(&self) -> LoadState {
        match &self.state {
            State::Loading => LoadState::Loading,
            State::Ready(_) => LoadState::Ready,
            State::Failed(reason) => LoadState::Failed(reason.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// The loaded searcher, once ready.
    pub fn searcher(&self) -> Result<&Searcher<O>, SessionError> {
        match &self.state {
            State::Ready(searcher) => Ok(&**searcher),
            State::Loading => Err(SessionError::Loading),
            State::Failed(reason) => Err(SessionError::Failed(reason.clone())),
        }
    }
}

impl<O: RankedOracle + DeserializeOwned> SearchSession<O> {
    /// Decode both payloads and become ready, or become failed.
    pub fn load(&mut self, index_bytes: &[u8], trie_bytes: &[u8]) -> Result<LoadReport, LoadError> {
        let start = Instant::now();
        match Self::decode_parts(index_bytes, trie_bytes) {
            Ok((payload, trie)) => {
                let documents = payload.store.len();
                let searcher = Searcher::new(payload.index, trie, payload.store, self.config.clone());
                self.state = State::Ready(Box::new(searcher));
                let report = LoadReport {
                    documents,
                    took: start.elapsed(),
                };
                info!(
                    "search index ready: {} documents in {:?}",
                    report.documents, report.took
                );
                Ok(report)
            }
            Err(e) => {
                error!("search index failed to load: {}", e);
                self.state = State::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn decode_parts(
        index_bytes: &[u8],
        trie_bytes: &[u8],
    ) -> Result<(IndexPayload<O>, Trie<DocId>), LoadError> {
        let payload: IndexPayload<O> = decode(index_bytes, PayloadKind::Index)?;
        let trie: Trie<DocId> = decode(trie_bytes, PayloadKind::Trie)?;
        Ok((payload, trie))
    }

    pub fn search(
        &self,
        query: &str,
        facet: Option<&FacetFilter>,
    ) -> Result<SearchOutcome, SessionError> {
        Ok(self.searcher()?.search(query, facet))
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query path, end to end.
//!
//! ```text
//! query ─▶ trie (≤ max_edit_distance) ─▶ candidate ids
//!            │ non-empty                    │ empty
//!            ▼                              │
//!   scoped oracle ─▶ cascade ──empty──┐     │
//!            │                        ▼     ▼
//!            │                full oracle ─▶ cascade ──empty──▶ joined re-run
//!            ▼                        │
//!         hits ◀──────────────────────┘
//!            ▼
//!   store lookup ─▶ per-field highlight ─▶ ResultItem
//! ```
//!
//! The trie narrows the corpus first: only documents holding a word within the
//! edit budget of the query are handed to a scoped oracle, so near-misses from
//! the rest of the corpus cannot crowd the page. When the trie has nothing to
//! offer, or the scoped oracle still comes back empty, the full oracle gets
//! the query.
//!
//! Errors never escape [`Searcher::search`]. Parse errors are expected while
//! the reader is typing (`title:` before the term); they and oracle failures
//! both come back as "no results".

use log::{debug, error, warn};
use serde::Serialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fuzzy::{collect_payloads, Trie};
use crate::highlight::{build_highlighted, term_positions};
use crate::oracle::{Hit, MatchData, Query, RankedOracle};
use crate::store::{Document, DocumentStore, FacetFilter, SectionTitle};
use crate::types::{DocId, DocRef, Field, Segment};
use crate::util::normalize;

use super::cascade::{join_whitespace, run_cascade, CascadeStage};

/// Which oracle produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HitSource {
    /// Oracle scoped to the trie's candidates.
    Scoped,
    Full,
    /// Full oracle, whitespace-joined query.
    Joined,
}

/// Hits before presentation, with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedHits {
    pub hits: Vec<Hit>,
    pub candidates: Vec<DocId>,
    /// `None` when nothing matched.
    pub source: Option<(HitSource, CascadeStage)>,
}

/// `component/version` grouping key and the header shown above the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupKey {
    pub key: String,
    pub header: String,
}

/// One display-ready result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub doc_ref: DocRef,
    pub score: f64,
    pub url: String,
    pub title: Vec<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_title: Option<Vec<Segment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<Vec<Segment>>,
    pub text: Vec<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupKey>,
    pub match_data: MatchData,
}

impl ResultItem {
    /// The keyword field matched something.
    pub fn has_keyword_match(&self) -> bool {
        self.keyword
            .as_ref()
            .is_some_and(|segments| segments.iter().any(Segment::is_marked))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank query: nothing searched, previous results should be cleared.
    Cleared,
    NoResults { query: String },
    Results(Vec<ResultItem>),
}

impl SearchOutcome {
    pub fn items(&self) -> &[ResultItem] {
        match self {
            SearchOutcome::Results(items) => items,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Consecutive results sharing a component version.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGroup<'a> {
    /// `None` for leading results without a known component version.
    pub header: Option<&'a GroupKey>,
    pub items: Vec<&'a ResultItem>,
}

/// Fold results into display groups, keeping result order.
///
/// A new group starts whenever an item's key differs from the current
/// group's. Items without a key stay in the current group.
pub fn group_by_component(items: &[ResultItem]) -> Vec<ResultGroup<'_>> {
    let mut groups: Vec<ResultGroup<'_>> = Vec::new();
    for item in items {
        let starts_group = match (&item.group, groups.last()) {
            (_, None) => true,
            (Some(key), Some(current)) => current.header.map(|h| &h.key) != Some(&key.key),
            (None, Some(_)) => false,
        };
        if starts_group {
            groups.push(ResultGroup {
                header: item.group.as_ref(),
                items: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.items.push(item);
        }
    }
    groups
}

// =============================================================================
// SEARCHER
// =============================================================================

/// Trie, oracle and store, loaded and immutable.
#[derive(Debug, Clone)]
pub struct Searcher<O> {
    oracle: O,
    trie: Trie<DocId>,
    store: DocumentStore,
    config: SearchConfig,
}

impl<O: RankedOracle> Searcher<O> {
    pub fn new(oracle: O, trie: Trie<DocId>, store: DocumentStore, config: SearchConfig) -> Self {
        Self {
            oracle,
            trie,
            store,
            config,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn trie(&self) -> &Trie<DocId> {
        &self.trie
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search and present. Never fails; see the module docs.
    pub fn search(&self, query: &str, facet: Option<&FacetFilter>) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Cleared;
        }

        match self.ranked_hits(query, facet) {
            Ok(ranked) if ranked.hits.is_empty() => SearchOutcome::NoResults {
                query: query.to_string(),
            },
            Ok(ranked) => SearchOutcome::Results(self.present(&ranked.hits)),
            Err(SearchError::Parse(e)) => {
                if self.config.debug {
                    debug!("query '{}' did not parse: {}", query, e);
                }
                SearchOutcome::NoResults {
                    query: query.to_string(),
                }
            }
            Err(e) => {
                error!("Something went wrong while searching for '{}': {}", query, e);
                SearchOutcome::NoResults {
                    query: query.to_string(),
                }
            }
        }
    }

    /// Document ids whose indexed words are within the edit budget of `query`.
    pub fn candidates(&self, query: &str) -> Vec<DocId> {
        let needle = normalize(query);
        let matches = self.trie.fuzzy_search(&needle, self.config.max_edit_distance);
        collect_payloads(&matches)
    }

    /// The hit list `search` would present, without presenting it.
    pub fn ranked_hits(
        &self,
        query: &str,
        facet: Option<&FacetFilter>,
    ) -> Result<RankedHits, SearchError> {
        let query = query.trim();
        let parsed = Query::parse(query)?;
        let keep = |hit: &Hit| match facet {
            Some(facet) => self
                .store
                .get(hit.doc_ref.doc_id)
                .is_some_and(|doc| facet.matches(doc)),
            None => true,
        };

        let candidates = self.candidates(query);
        let mut ranked = RankedHits {
            hits: Vec::new(),
            candidates,
            source: None,
        };

        let docs = self.store.resolve(&ranked.candidates);
        if !docs.is_empty() {
            let scoped = self.oracle.scoped(&docs);
            let outcome = run_cascade(&scoped, &parsed, &keep)?;
            if let Some(stage) = outcome.stage {
                ranked.hits = outcome.hits;
                ranked.source = Some((HitSource::Scoped, stage));
                return Ok(ranked);
            }
        }

        let outcome = run_cascade(&self.oracle, &parsed, &keep)?;
        if let Some(stage) = outcome.stage {
            ranked.hits = outcome.hits;
            ranked.source = Some((HitSource::Full, stage));
            return Ok(ranked);
        }

        if let Some(joined) = join_whitespace(query, self.config.join_char) {
            let outcome = run_cascade(&self.oracle, &Query::parse(&joined)?, &keep)?;
            if let Some(stage) = outcome.stage {
                ranked.hits = outcome.hits;
                ranked.source = Some((HitSource::Joined, stage));
            }
        }
        Ok(ranked)
    }

    fn present(&self, hits: &[Hit]) -> Vec<ResultItem> {
        hits.iter()
            .filter_map(|hit| {
                let item = self.present_hit(hit);
                if item.is_none() {
                    warn!("hit {} has no document in the store", hit.doc_ref);
                }
                item
            })
            .collect()
    }

    fn present_hit(&self, hit: &Hit) -> Option<ResultItem> {
        let (doc, section) = self.store.lookup(hit.doc_ref)?;
        let n = self.config.snippet_length;

        let title_terms = hit.match_data.terms_in(Field::Title);
        let keyword = doc
            .keyword
            .as_deref()
            .map(|k| highlight_field(k, &hit.match_data.terms_in(Field::Keyword), n));

        Some(ResultItem {
            doc_ref: hit.doc_ref,
            score: hit.score,
            url: self.link(doc, section),
            title: highlight_field(&doc.title, &title_terms, n),
            section_title: section.map(|s| highlight_field(&s.text, &title_terms, n)),
            keyword,
            text: highlight_field(&doc.text, &hit.match_data.terms_in(Field::Text), n),
            group: self.group_key(doc),
            match_data: hit.match_data.clone(),
        })
    }

    fn link(&self, doc: &Document, section: Option<&SectionTitle>) -> String {
        let mut url = format!("{}{}", self.config.site_root_path, doc.url);
        if let Some(section) = section {
            url.push('#');
            url.push_str(&section.hash);
        }
        url
    }

    fn group_key(&self, doc: &Document) -> Option<GroupKey> {
        let (key, cv) = self.store.component_version(doc)?;
        let mut header = cv.title.clone();
        let has_version = doc.version.as_deref().is_some_and(|v| !v.is_empty());
        if let (true, Some(display)) = (has_version, cv.display_version.as_deref()) {
            header.push(' ');
            header.push_str(display);
        }
        Some(GroupKey { key, header })
    }
}

fn highlight_field(text: &str, terms: &[&str], snippet_length: usize) -> Vec<Segment> {
    let positions = term_positions(text, terms.iter().copied());
    build_highlighted(text, &positions, snippet_length)
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ranked-retrieval oracle contract.
//!
//! The search path never ranks anything itself. It hands a structured query
//! to something implementing [`RankedOracle`] and gets scored references back,
//! each with the terms that matched in which fields. [`memory::MemoryIndex`] is
//! the in-tree implementation; anything that honours the clause semantics
//! below can stand in for it.
//!
//! # Clause semantics
//!
//! - `presence`: optional clauses score, required clauses must match,
//!   prohibited clauses must not.
//! - `*` anywhere in the term is a wildcard. `wildcard` records where the
//!   cascade put them.
//! - `use_pipeline = false` skips term normalization (wildcard terms are
//!   matched as typed).
//! - `edit_distance > 0` matches index terms within that many edits.

pub mod memory;
pub mod parser;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, QueryParseError};
use crate::store::Document;
use crate::types::{DocRef, Field, MatchPosition};

pub use memory::MemoryIndex;
pub use parser::parse_query;

// =============================================================================
// QUERY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Optional,
    Required,
    Prohibited,
}

/// Where a clause term carries `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wildcard {
    #[default]
    None,
    Leading,
    Trailing,
    Both,
}

impl Wildcard {
    pub fn from_flags(leading: bool, trailing: bool) -> Self {
        match (leading, trailing) {
            (false, false) => Wildcard::None,
            (true, false) => Wildcard::Leading,
            (false, true) => Wildcard::Trailing,
            (true, true) => Wildcard::Both,
        }
    }

    pub fn leading(self) -> bool {
        matches!(self, Wildcard::Leading | Wildcard::Both)
    }

    pub fn trailing(self) -> bool {
        matches!(self, Wildcard::Trailing | Wildcard::Both)
    }
}

/// One term of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Fields to search; empty means every indexed field.
    pub fields: Vec<Field>,
    pub term: String,
    pub presence: Presence,
    pub wildcard: Wildcard,
    pub use_pipeline: bool,
    pub boost: f64,
    pub edit_distance: usize,
}

impl Clause {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            term: term.into(),
            presence: Presence::Optional,
            wildcard: Wildcard::None,
            use_pipeline: true,
            boost: 1.0,
            edit_distance: 0,
        }
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Add `*` where `wildcard` asks for it (unless already there) and skip
    /// the pipeline, the way the cascade relaxes a term.
    pub fn with_wildcard(mut self, wildcard: Wildcard) -> Self {
        if wildcard.leading() && !self.term.starts_with('*') {
            self.term.insert(0, '*');
        }
        if wildcard.trailing() && !self.term.ends_with('*') {
            self.term.push('*');
        }
        let leading = self.wildcard.leading() || wildcard.leading();
        let trailing = self.wildcard.trailing() || wildcard.trailing();
        self.wildcard = Wildcard::from_flags(leading, trailing);
        self.use_pipeline = false;
        self
    }

    pub fn has_wildcard(&self) -> bool {
        self.term.contains('*')
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub clauses: Vec<Clause>,
}

impl Query {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Parse the query-string syntax (see [`parser`]).
    pub fn parse(input: &str) -> Result<Self, QueryParseError> {
        parse_query(input)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Same query with every non-prohibited clause relaxed by `wildcard`.
    /// Prohibited clauses are kept verbatim.
    pub fn relaxed(&self, wildcard: Wildcard) -> Self {
        let clauses = self
            .clauses
            .iter()
            .map(|clause| match clause.presence {
                Presence::Prohibited => clause.clone(),
                _ => clause.clone().with_wildcard(wildcard),
            })
            .collect();
        Self { clauses }
    }
}

// =============================================================================
// HITS
// =============================================================================

/// Matched term → field → spans inside that field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchData(pub BTreeMap<String, BTreeMap<Field, Vec<MatchPosition>>>);

impl MatchData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, term: &str, field: Field, positions: &[MatchPosition]) {
        self.0
            .entry(term.to_string())
            .or_default()
            .entry(field)
            .or_default()
            .extend_from_slice(positions);
    }

    /// Fold `other` into this one.
    pub fn merge(&mut self, other: MatchData) {
        for (term, fields) in other.0 {
            for (field, positions) in fields {
                self.add(&term, field, &positions);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Terms that matched in `field`.
    pub fn terms_in(&self, field: Field) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, fields)| fields.contains_key(&field))
            .map(|(term, _)| term.as_str())
            .collect()
    }
}

/// One scored reference returned by an oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub doc_ref: DocRef,
    pub score: f64,
    pub match_data: MatchData,
}

// =============================================================================
// FIELD CONFIGURATION
// =============================================================================

/// An indexed field and its score multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: Field,
    pub boost: f64,
}

impl FieldSpec {
    pub fn new(field: Field, boost: f64) -> Self {
        Self { field, boost }
    }
}

/// Title ×10, keyword ×5, everything else ×1.
pub fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(Field::Title, 10.0),
        FieldSpec::new(Field::Name, 1.0),
        FieldSpec::new(Field::Text, 1.0),
        FieldSpec::new(Field::Component, 1.0),
        FieldSpec::new(Field::Keyword, 5.0),
    ]
}

// =============================================================================
// CONTRACT
// =============================================================================

/// A term search engine returning scored document references.
pub trait RankedOracle {
    /// Run a query. Hits come back best first.
    fn query(&self, query: &Query) -> Result<Vec<Hit>, OracleError>;

    /// An oracle with the same configuration over exactly `documents`.
    fn scoped(&self, documents: &[&Document]) -> Self
    where
        Self: Sized;
}

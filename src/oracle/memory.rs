// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory term index implementing [`RankedOracle`].
//!
//! Small and honest rather than fast: a sorted vocabulary of normalized terms,
//! each with postings `(ref, field, positions)`. Queries expand every clause
//! to the vocabulary terms it covers (exact, wildcard, or within an edit
//! budget), score the refs those terms occur in, then apply presence rules.
//!
//! # Invariants
//!
//! 1. **POSTINGS_SORTED**: each term's postings are sorted by `(ref, field)`
//!    with at most one posting per pair.
//! 2. **NO_EMPTY_TERMS**: every vocabulary term has at least one posting.
//! 3. **REFS_SORTED**: `refs` is sorted and duplicate-free.
//!
//! # Scoring
//!
//! ```text
//! score(ref) = Σ clauses Σ expanded terms Σ fields
//!              field_boost × clause_boost × expansion_weight × idf × tf / (tf + K1)
//! ```
//!
//! Exact terms weigh 1. Wildcard expansions weigh `literal chars / term chars`,
//! fuzzy expansions `1 / (1 + distance)`, so the term the reader typed beats
//! its relatives.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::fuzzy::{levenshtein, levenshtein_within};
use crate::store::Document;
use crate::types::{DocRef, Field, MatchPosition};
use crate::util::{normalize, tokenize, trim_token};

use super::{Clause, FieldSpec, Hit, MatchData, Presence, Query, RankedOracle};

/// Term-frequency saturation.
const K1: f64 = 1.2;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Posting {
    #[serde(rename = "ref")]
    doc_ref: DocRef,
    field: Field,
    positions: Vec<MatchPosition>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryIndex {
    fields: Vec<FieldSpec>,
    refs: Vec<DocRef>,
    terms: BTreeMap<String, Vec<Posting>>,
}

/// A vocabulary term a clause expanded to, with its weight.
struct Expansion<'a> {
    term: &'a str,
    weight: f64,
}

/// Refs one clause matched.
type ClauseMatches = BTreeMap<DocRef, (f64, MatchData)>;

/// Query-side pipeline: trim non-word characters, then normalize.
fn pipeline(term: &str) -> String {
    normalize(trim_token(term))
}

/// `*` matches any run of characters; everything else is literal.
fn glob_regex(pattern: &str) -> Result<Regex, OracleError> {
    let body: Vec<String> = pattern.split('*').map(regex::escape).collect();
    let source = format!("^{}$", body.join(".*"));
    Regex::new(&source).map_err(|e| OracleError::InvalidTerm {
        term: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl MemoryIndex {
    /// Empty index over `fields`.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            refs: Vec::new(),
            terms: BTreeMap::new(),
        }
    }

    /// One ref per document, indexing every configured field it has.
    pub fn from_documents(fields: Vec<FieldSpec>, documents: &[&Document]) -> Self {
        let mut index = Self::new(fields);
        for doc in documents {
            index.add_document(doc);
        }
        index
    }

    /// Like [`from_documents`](Self::from_documents), plus one `doc-section`
    /// ref per section title, indexed as that ref's title.
    pub fn with_sections(fields: Vec<FieldSpec>, documents: &[&Document]) -> Self {
        let mut index = Self::from_documents(fields, documents);
        for doc in documents {
            for section in &doc.titles {
                index.add(
                    DocRef::section(doc.id, section.id),
                    &[(Field::Title, section.text.as_str())],
                );
            }
        }
        index
    }

    fn add_document(&mut self, doc: &Document) {
        let values: Vec<(Field, &str)> = self
            .fields
            .iter()
            .filter_map(|spec| doc.field_text(spec.field).map(|text| (spec.field, text)))
            .collect();
        self.add(DocRef::document(doc.id), &values);
    }

    /// Index `values` under `doc_ref`. Fields outside the configuration are
    /// ignored; adding the same `(ref, field)` twice appends positions.
    pub fn add(&mut self, doc_ref: DocRef, values: &[(Field, &str)]) {
        if let Err(at) = self.refs.binary_search(&doc_ref) {
            self.refs.insert(at, doc_ref);
        }

        for &(field, text) in values {
            if self.boost_of(field).is_none() {
                continue;
            }
            let mut by_term: BTreeMap<String, Vec<MatchPosition>> = BTreeMap::new();
            for token in tokenize(text) {
                by_term.entry(token.term).or_default().push(token.position);
            }

            for (term, positions) in by_term {
                let postings = self.terms.entry(term).or_default();
                let key = (doc_ref, field);
                match postings.binary_search_by(|p| (p.doc_ref, p.field).cmp(&key)) {
                    Ok(at) => postings[at].positions.extend(positions),
                    Err(at) => postings.insert(
                        at,
                        Posting {
                            doc_ref,
                            field,
                            positions,
                        },
                    ),
                }
            }
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of indexed refs (documents plus sections).
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    fn boost_of(&self, field: Field) -> Option<f64> {
        self.fields.iter().find(|s| s.field == field).map(|s| s.boost)
    }

    fn idf(&self, postings: &[Posting]) -> f64 {
        let mut refs: Vec<DocRef> = postings.iter().map(|p| p.doc_ref).collect();
        refs.dedup();
        let df = refs.len() as f64;
        let n = self.refs.len() as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Vocabulary terms a clause covers.
    fn expand(&self, clause: &Clause) -> Result<Vec<Expansion<'_>>, OracleError> {
        let term = if clause.use_pipeline {
            pipeline(&clause.term)
        } else {
            clause.term.clone()
        };
        if term.is_empty() {
            return Ok(Vec::new());
        }

        if term.contains('*') {
            let literal = term.chars().filter(|&c| c != '*').count() as f64;
            let weight = |t: &str| {
                let len = t.chars().count().max(1) as f64;
                (literal / len).clamp(0.0, 1.0)
            };

            let prefix = term.trim_end_matches('*');
            let expansions = if !prefix.contains('*') {
                // Prefix-only pattern: a range scan is enough.
                self.terms
                    .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
                    .take_while(|(t, _)| t.starts_with(prefix))
                    .map(|(t, _)| Expansion {
                        term: t.as_str(),
                        weight: weight(t.as_str()),
                    })
                    .collect()
            } else {
                let re = glob_regex(&term)?;
                self.terms
                    .keys()
                    .filter(|t| re.is_match(t))
                    .map(|t| Expansion {
                        term: t.as_str(),
                        weight: weight(t.as_str()),
                    })
                    .collect()
            };
            return Ok(expansions);
        }

        if clause.edit_distance > 0 {
            return Ok(self
                .terms
                .keys()
                .filter(|t| levenshtein_within(&term, t, clause.edit_distance))
                .map(|t| Expansion {
                    term: t.as_str(),
                    weight: 1.0 / (1.0 + levenshtein(&term, t) as f64),
                })
                .collect());
        }

        Ok(self
            .terms
            .get_key_value(term.as_str())
            .map(|(t, _)| Expansion {
                term: t.as_str(),
                weight: 1.0,
            })
            .into_iter()
            .collect())
    }

    fn clause_fields(&self, clause: &Clause) -> Result<Vec<(Field, f64)>, OracleError> {
        if clause.fields.is_empty() {
            return Ok(self.fields.iter().map(|s| (s.field, s.boost)).collect());
        }
        clause
            .fields
            .iter()
            .map(|&field| {
                self.boost_of(field)
                    .map(|boost| (field, boost))
                    .ok_or_else(|| OracleError::UnknownField(field.to_string()))
            })
            .collect()
    }

    fn match_clause(&self, clause: &Clause) -> Result<ClauseMatches, OracleError> {
        let fields = self.clause_fields(clause)?;
        let mut matches = ClauseMatches::new();

        for expansion in self.expand(clause)? {
            let Some(postings) = self.terms.get(expansion.term) else {
                continue;
            };
            let idf = self.idf(postings);

            for posting in postings {
                let Some(&(_, field_boost)) = fields.iter().find(|(f, _)| *f == posting.field)
                else {
                    continue;
                };
                let tf = posting.positions.len() as f64;
                let score = field_boost * clause.boost * expansion.weight * idf * tf / (tf + K1);

                let entry = matches.entry(posting.doc_ref).or_default();
                entry.0 += score;
                entry
                    .1
                    .add(expansion.term, posting.field, &posting.positions);
            }
        }
        Ok(matches)
    }
}

impl RankedOracle for MemoryIndex {
    fn query(&self, query: &Query) -> Result<Vec<Hit>, OracleError> {
        let mut scored: BTreeMap<DocRef, (f64, MatchData)> = BTreeMap::new();
        let mut required: Option<BTreeSet<DocRef>> = None;
        let mut prohibited: BTreeSet<DocRef> = BTreeSet::new();
        let mut positive_clauses = 0usize;

        for clause in &query.clauses {
            let matches = self.match_clause(clause)?;
            trace!(
                "clause '{}' ({:?}) matched {} refs",
                clause.term,
                clause.presence,
                matches.len()
            );

            match clause.presence {
                Presence::Prohibited => {
                    prohibited.extend(matches.into_keys());
                    continue;
                }
                Presence::Required => {
                    let refs: BTreeSet<DocRef> = matches.keys().copied().collect();
                    required = Some(match required {
                        Some(prev) => prev.intersection(&refs).copied().collect(),
                        None => refs,
                    });
                }
                Presence::Optional => {}
            }

            positive_clauses += 1;
            for (doc_ref, (score, data)) in matches {
                let entry = scored.entry(doc_ref).or_default();
                entry.0 += score;
                entry.1.merge(data);
            }
        }

        if query.clauses.is_empty() {
            return Ok(Vec::new());
        }

        // Only prohibited clauses: everything else matches.
        if positive_clauses == 0 {
            return Ok(self
                .refs
                .iter()
                .filter(|r| !prohibited.contains(r))
                .map(|&doc_ref| Hit {
                    doc_ref,
                    score: 0.0,
                    match_data: MatchData::new(),
                })
                .collect());
        }

        let mut hits: Vec<Hit> = scored
            .into_iter()
            .filter(|(r, _)| !prohibited.contains(r))
            .filter(|(r, _)| required.as_ref().map_or(true, |set| set.contains(r)))
            .map(|(doc_ref, (score, match_data))| Hit {
                doc_ref,
                score,
                match_data,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc_ref.cmp(&b.doc_ref))
        });
        Ok(hits)
    }

    fn scoped(&self, documents: &[&Document]) -> Self {
        MemoryIndex::from_documents(self.fields.clone(), documents)
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The three-stage cascade: exact → prefix → substring.
//!
//! Search-as-you-type means the reader is usually mid-word. "tri" matches
//! nothing exactly, but `tri*` finds "trie" and `*tri*` finds "distribution".
//! Each stage only runs when the one before came back empty, so a precise
//! query never pays for the looser ones, and an exact hit is never buried
//! under substring noise.
//!
//! Prohibited clauses are kept verbatim in every stage: relaxing `-legacy` to
//! `-*legacy*` would exclude far more than the reader asked for.

use std::fmt;

use log::debug;

use crate::error::OracleError;
use crate::oracle::{Hit, Query, RankedOracle, Wildcard};

/// Which relaxation produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CascadeStage {
    Exact,
    Prefix,
    Substring,
}

impl CascadeStage {
    pub const ALL: [CascadeStage; 3] = [
        CascadeStage::Exact,
        CascadeStage::Prefix,
        CascadeStage::Substring,
    ];

    /// The query this stage sends to the oracle.
    pub fn apply(self, query: &Query) -> Query {
        match self {
            CascadeStage::Exact => query.clone(),
            CascadeStage::Prefix => query.relaxed(Wildcard::Trailing),
            CascadeStage::Substring => query.relaxed(Wildcard::Both),
        }
    }
}

impl fmt::Display for CascadeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CascadeStage::Exact => "exact",
            CascadeStage::Prefix => "prefix",
            CascadeStage::Substring => "substring",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CascadeOutcome {
    /// Stage that produced `hits`; `None` when every stage came back empty.
    pub stage: Option<CascadeStage>,
    pub hits: Vec<Hit>,
}

impl CascadeOutcome {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Run the stages in order and stop at the first with a hit `keep` accepts.
///
/// `keep` filters every stage's hits before the emptiness check, so a stage
/// whose hits are all filtered out lets the next stage run.
pub fn run_cascade<O, F>(oracle: &O, query: &Query, keep: F) -> Result<CascadeOutcome, OracleError>
where
    O: RankedOracle + ?Sized,
    F: Fn(&Hit) -> bool,
{
    if query.is_empty() {
        return Ok(CascadeOutcome::default());
    }

    for stage in CascadeStage::ALL {
        let hits: Vec<Hit> = oracle
            .query(&stage.apply(query))?
            .into_iter()
            .filter(|hit| keep(hit))
            .collect();
        if !hits.is_empty() {
            debug!("cascade: {} stage returned {} hits", stage, hits.len());
            return Ok(CascadeOutcome {
                stage: Some(stage),
                hits,
            });
        }
    }

    debug!("cascade: no stage returned hits");
    Ok(CascadeOutcome::default())
}

/// The raw query with every whitespace run replaced by `join_char`, or
/// `None` when it has no inner whitespace.
///
/// Catches identifiers the reader typed with spaces: "snake case" → "snake_case".
pub fn join_whitespace(raw: &str, join_char: char) -> Option<String> {
    let trimmed = raw.trim();
    if !trimmed.contains(char::is_whitespace) {
        return None;
    }
    let sep = join_char.to_string();
    Some(trimmed.split_whitespace().collect::<Vec<_>>().join(&sep))
}

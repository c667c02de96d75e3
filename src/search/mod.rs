// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: where the trie, the oracle and the highlighter meet.
//!
//! `cascade` relaxes a query until the oracle answers. `orchestrator` decides
//! which oracle gets asked and turns the hits into display-ready results.

pub mod cascade;
pub mod orchestrator;

pub use cascade::{join_whitespace, run_cascade, CascadeOutcome, CascadeStage};
pub use orchestrator::{
    group_by_component, GroupKey, HitSource, RankedHits, ResultGroup, ResultItem, SearchOutcome,
    Searcher,
};

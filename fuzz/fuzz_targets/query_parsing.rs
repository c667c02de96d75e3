// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the query parser and the search path behind it.
//!
//! Whatever the reader types, parsing returns a value or an error and
//! `search` returns an outcome. Nothing panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sleuth::testing::fixture_searcher;
use sleuth::Query;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 256 {
        return;
    }

    if let Ok(query) = Query::parse(input) {
        for clause in &query.clauses {
            assert!(clause.boost.is_finite() && clause.boost >= 0.0);
        }
    }

    static SEARCHER: std::sync::OnceLock<sleuth::Searcher<sleuth::MemoryIndex>> =
        std::sync::OnceLock::new();
    let searcher = SEARCHER.get_or_init(fixture_searcher);
    let _ = searcher.search(input, None);
});

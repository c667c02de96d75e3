// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-time knobs.

use serde::{Deserialize, Serialize};

/// Characters either side of the first match in a highlighted snippet.
pub const DEFAULT_SNIPPET_LENGTH: usize = 100;

/// Edit budget for the candidate trie lookup.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 3;

/// Replaces whitespace runs for the joined re-run ("snake case" → "snake_case").
pub const DEFAULT_JOIN_CHAR: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub snippet_length: usize,
    pub max_edit_distance: usize,
    pub join_char: char,
    /// Prefixed to every result url.
    pub site_root_path: String,
    /// Log query parse errors on the debug channel.
    pub debug: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_length: DEFAULT_SNIPPET_LENGTH,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            join_char: DEFAULT_JOIN_CHAR,
            site_root_path: String::new(),
            debug: false,
        }
    }
}

impl SearchConfig {
    pub fn with_snippet_length(mut self, snippet_length: usize) -> Self {
        self.snippet_length = snippet_length;
        self
    }

    pub fn with_max_edit_distance(mut self, max_edit_distance: usize) -> Self {
        self.max_edit_distance = max_edit_distance;
        self
    }

    pub fn with_site_root_path(mut self, site_root_path: impl Into<String>) -> Self {
        self.site_root_path = site_root_path.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A character trie that tolerates typos.
//!
//! Two types for the two halves of its life. `TrieBuilder` is the mutable,
//! keyed form used at index-build time. `Trie` is what gets serialized,
//! shipped and loaded: children are a plain list of `(char, node)` pairs,
//! good for traversal and nothing else. Nobody inserts into a loaded trie.
//!
//! # Wire format
//!
//! ```json
//! {"children": [["s", {...}], ["t", {...}]], "isEndOfWord": false, "data": []}
//! ```
//!
//! The builder emits children sorted by character, so the same input always
//! serializes to the same bytes.
//!
//! # Fuzzy search
//!
//! Depth-first walk with a shrinking edit budget and a cursor into the query.
//! Matching characters are free; every mismatching edge costs one unit and
//! fans out three ways (substitute, skip a query char, skip a trie char).
//! Trie characters past the end of the query cost one unit each. A branch
//! dies when the budget goes negative.
//!
//! The walk only proposes candidates. A word is accepted when its exact
//! `levenshtein` distance to the query is within `max_distance`, so the result
//! is exactly the brute-force set `{w : distance(w, q) ≤ max}`.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::levenshtein::levenshtein;

// =============================================================================
// BUILD-TIME TRIE
// =============================================================================

#[derive(Debug, Clone)]
struct BuilderNode<T> {
    children: BTreeMap<char, BuilderNode<T>>,
    is_end_of_word: bool,
    data: Vec<T>,
}

impl<T> BuilderNode<T> {
    fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            is_end_of_word: false,
            data: Vec::new(),
        }
    }

    fn freeze(self) -> TrieNode<T> {
        TrieNode {
            children: self
                .children
                .into_iter()
                .map(|(c, child)| (c, child.freeze()))
                .collect(),
            is_end_of_word: self.is_end_of_word,
            data: self.data,
        }
    }
}

/// Mutable trie used while building an index.
#[derive(Debug, Clone)]
pub struct TrieBuilder<T> {
    root: BuilderNode<T>,
    insertions: usize,
}

impl<T> Default for TrieBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TrieBuilder<T> {
    pub fn new() -> Self {
        Self {
            root: BuilderNode::new(),
            insertions: 0,
        }
    }

    /// Insert `word` with an attached payload.
    ///
    /// Inserting the same word again appends another payload instead of
    /// replacing the first one. Case folding is the caller's job.
    pub fn insert(&mut self, word: &str, payload: T) {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_insert_with(BuilderNode::new);
        }
        node.is_end_of_word = true;
        node.data.push(payload);
        self.insertions += 1;
    }

    /// Number of `insert` calls so far.
    pub fn len(&self) -> usize {
        self.insertions
    }

    pub fn is_empty(&self) -> bool {
        self.insertions == 0
    }

    /// Freeze into the read-only, serializable form.
    pub fn build(self) -> Trie<T> {
        Trie {
            root: self.root.freeze(),
        }
    }
}

// =============================================================================
// QUERY-TIME TRIE
// =============================================================================

/// One node of a loaded trie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrieNode<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<(char, TrieNode<T>)>,
    #[serde(default)]
    pub is_end_of_word: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> TrieNode<T> {
    fn child(&self, c: char) -> Option<&TrieNode<T>> {
        self.children.iter().find(|(k, _)| *k == c).map(|(_, n)| n)
    }
}

/// Read-only trie, as loaded from a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trie<T> {
    root: TrieNode<T>,
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self {
            root: TrieNode {
                children: Vec::new(),
                is_end_of_word: false,
                data: Vec::new(),
            },
        }
    }
}

/// A word within edit distance of the query, with everything inserted under it.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'a, T> {
    pub word: String,
    pub distance: usize,
    pub payloads: &'a [T],
}

/// Shape of a loaded trie, for `inspect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieStats {
    pub nodes: usize,
    pub words: usize,
    pub payloads: usize,
    pub max_depth: usize,
}

struct Frame<'a, T> {
    node: &'a TrieNode<T>,
    word: String,
    cursor: usize,
    budget: isize,
}

impl<T> Trie<T> {
    pub fn root(&self) -> &TrieNode<T> {
        &self.root
    }

    /// Exact lookup: payloads stored under `word`, if it was inserted.
    pub fn get(&self, word: &str) -> Option<&[T]> {
        let mut node = &self.root;
        for c in word.chars() {
            node = node.child(c)?;
        }
        node.is_end_of_word.then_some(node.data.as_slice())
    }

    /// All inserted words within `max_distance` edits of `query`.
    ///
    /// Each word appears once, with its full payload list, ordered by
    /// (distance, word).
    pub fn fuzzy_search(&self, query: &str, max_distance: usize) -> Vec<FuzzyMatch<'_, T>> {
        let target: Vec<char> = query.chars().collect();
        let mut matches: Vec<FuzzyMatch<'_, T>> = Vec::new();

        // Node addresses identify words: a trie path is unique per node.
        let mut checked: HashSet<usize> = HashSet::new();
        let mut visited: HashSet<(usize, usize, isize)> = HashSet::new();

        let mut stack = vec![Frame {
            node: &self.root,
            word: String::new(),
            cursor: 0,
            budget: max_distance as isize,
        }];

        while let Some(frame) = stack.pop() {
            let node = frame.node;
            let addr = node_addr(node);
            if frame.budget < 0 || !visited.insert((addr, frame.cursor, frame.budget)) {
                continue;
            }

            if node.is_end_of_word && checked.insert(addr) {
                let distance = levenshtein(&frame.word, query);
                if distance <= max_distance {
                    matches.push(FuzzyMatch {
                        word: frame.word.clone(),
                        distance,
                        payloads: &node.data,
                    });
                }
            }

            // Cursor only advances while inside the query, so this never fires
            // for well-formed frames; kept as a hard stop.
            if frame.cursor > target.len() {
                continue;
            }

            if frame.cursor < target.len() {
                let expected = target[frame.cursor];
                let mut skipped_query_char = false;
                for (c, child) in &node.children {
                    if *c == expected {
                        stack.push(frame.descend(*c, child, frame.cursor + 1, frame.budget));
                        continue;
                    }
                    let budget = frame.budget - 1;
                    if budget < 0 {
                        continue;
                    }
                    // substitution
                    stack.push(frame.descend(*c, child, frame.cursor + 1, budget));
                    // insertion: identical state for every mismatching edge
                    if !skipped_query_char {
                        skipped_query_char = true;
                        stack.push(Frame {
                            node,
                            word: frame.word.clone(),
                            cursor: frame.cursor + 1,
                            budget,
                        });
                    }
                    // deletion
                    stack.push(frame.descend(*c, child, frame.cursor, budget));
                }
            } else if frame.budget > 0 {
                for (c, child) in &node.children {
                    stack.push(frame.descend(*c, child, frame.cursor, frame.budget - 1));
                }
            }
        }

        matches.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.word.cmp(&b.word)));
        matches
    }

    /// Walk the whole trie once and count what is in it.
    pub fn stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);
            if node.is_end_of_word {
                stats.words += 1;
                stats.payloads += node.data.len();
            }
            stack.extend(node.children.iter().map(|(_, child)| (child, depth + 1)));
        }
        stats
    }
}

impl<'a, T> Frame<'a, T> {
    fn descend(&self, c: char, child: &'a TrieNode<T>, cursor: usize, budget: isize) -> Frame<'a, T> {
        let mut word = String::with_capacity(self.word.len() + c.len_utf8());
        word.push_str(&self.word);
        word.push(c);
        Frame {
            node: child,
            word,
            cursor,
            budget,
        }
    }
}

fn node_addr<T>(node: &TrieNode<T>) -> usize {
    node as *const TrieNode<T> as usize
}

/// Union of the payloads of every match, first occurrence order.
pub fn collect_payloads<T: Clone + Eq + std::hash::Hash>(matches: &[FuzzyMatch<'_, T>]) -> Vec<T> {
    let mut seen: HashSet<T> = HashSet::new();
    let mut out = Vec::new();
    for m in matches {
        for payload in m.payloads {
            if seen.insert(payload.clone()) {
                out.push(payload.clone());
            }
        }
    }
    out
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance: the exact one and the early-exit one.
//!
//! `levenshtein` fills the whole matrix and is the authority the trie search
//! defers to when deciding whether a word is close enough. `levenshtein_within`
//! answers the cheaper yes/no question and bails out as soon as the answer is
//! known; the reference oracle uses it to expand `term~n` clauses.
//!
//! Both count characters, not bytes.

/// Minimum number of single-character insertions, deletions and substitutions
/// turning `a` into `b`.
///
/// Classic Wagner-Fischer over a `(|b|+1) × (|a|+1)` matrix. Symmetric, zero
/// exactly on equal strings, and satisfies the triangle inequality.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a.len() {
        matrix[0][j] = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            matrix[i][j] = if b[i - 1] == a[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                (matrix[i - 1][j - 1] + 1) // substitution
                    .min(matrix[i][j - 1] + 1) // insertion
                    .min(matrix[i - 1][j] + 1) // deletion
            };
        }
    }

    matrix[b.len()][a.len()]
}

/// Are these strings within `max` edits of each other?
///
/// Bounded Levenshtein with two early-exit paths:
/// 1. If length difference exceeds `max`, return false immediately
/// 2. If minimum row value exceeds `max`, abandon the DP early
///
/// Neither exit can reject a pair whose true distance is `≤ max`.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Length difference is a lower bound on edit distance
    if a_len.abs_diff(b_len) > max {
        return false;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return false;
        }
    }

    dp[b_len] <= max
}

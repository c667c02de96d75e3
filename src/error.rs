// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types, one enum per concern.
//!
//! Query-time errors (`QueryParseError`, `OracleError`) never reach the caller
//! of `Searcher::search`; they are logged and degrade to an empty result.
//! Load-time errors (`LoadError`) are fatal to a session until it is reloaded.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::payload::PayloadKind;

/// Malformed query syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    #[error("expecting term, found nothing (at {position})")]
    ExpectingTerm { position: usize },
    #[error("unrecognised field '{field}' (at {position})")]
    UnrecognisedField { field: String, position: usize },
    #[error("edit distance must be numeric, found '{value}'")]
    InvalidEditDistance { value: String },
    #[error("boost must be numeric, found '{value}'")]
    InvalidBoost { value: String },
    #[error("unbalanced quote (at {position})")]
    UnbalancedQuote { position: usize },
}

/// Failure inside a ranked-retrieval oracle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("field '{0}' is not indexed")]
    UnknownField(String),
    #[error("invalid term '{term}': {reason}")]
    InvalidTerm { term: String, reason: String },
    #[error("oracle failure: {0}")]
    Internal(String),
}

/// Anything that can go wrong while running one query.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Parse(#[from] QueryParseError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// A serialized payload could not be turned back into its structure.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{kind} payload truncated: {len} bytes")]
    Truncated { kind: PayloadKind, len: usize },
    #[error("{kind} payload too large: {len} bytes")]
    TooLarge { kind: PayloadKind, len: usize },
    #[error("{kind} payload has no valid footer")]
    BadMagic { kind: PayloadKind },
    #[error("{kind} payload checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        kind: PayloadKind,
        expected: u32,
        actual: u32,
    },
    #[error("{kind} payload failed to decompress: {source}")]
    Decompress {
        kind: PayloadKind,
        #[source]
        source: io::Error,
    },
    #[error("{kind} payload is not valid JSON: {source}")]
    Parse {
        kind: PayloadKind,
        #[source]
        source: serde_json::Error,
    },
}

/// The session cannot accept queries right now.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("index is still loading")]
    Loading,
    #[error("index failed to load: {0}")]
    Failed(String),
}

/// Index build failures (CLI `build`).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to compress {kind} payload: {source}")]
    Compress {
        kind: PayloadKind,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode {kind} payload: {source}")]
    Encode {
        kind: PayloadKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate document id {0}")]
    DuplicateDocument(crate::types::DocId),
}

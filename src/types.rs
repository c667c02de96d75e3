// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The small vocabulary every other module speaks.
//!
//! Document identifiers, references into documents (optionally narrowed to a
//! section), match spans and highlighted segments. None of these know how
//! they were produced. They are the currency passed between the trie, the
//! oracle, the highlighter and the caller.
//!
//! # Invariants
//!
//! - **MatchPosition**: valid for a field iff `length > 0 ∧ start + length ≤ len(field)`.
//!   Offsets count characters (Unicode scalar values), never bytes.
//!
//! - **Segment sequence**: concatenating the segment texts with ellipsis markers
//!   removed yields one contiguous substring of the source field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marker appended or prepended to a snippet when the window cuts the text.
pub const ELLIPSIS: &str = "...";

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Type-safe document identifier.
///
/// Serialized as a bare number so that store keys and trie payloads stay
/// compact (`{"7": {...}}`, `"data": [7, 9]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reference returned by the oracle: a document, optionally narrowed to one
/// of its section titles.
///
/// The textual form is `"<doc>"` or `"<doc>-<section>"`, which is what oracle
/// indexes store as their document reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocRef {
    pub doc_id: DocId,
    pub section_id: Option<u32>,
}

impl DocRef {
    pub fn document(doc_id: DocId) -> Self {
        Self {
            doc_id,
            section_id: None,
        }
    }

    pub fn section(doc_id: DocId, section_id: u32) -> Self {
        Self {
            doc_id,
            section_id: Some(section_id),
        }
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section_id {
            Some(section) => write!(f, "{}-{}", self.doc_id, section),
            None => write!(f, "{}", self.doc_id),
        }
    }
}

/// Error for references that are not `<u32>` or `<u32>-<u32>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed document reference '{0}'")]
pub struct DocRefParseError(pub String);

impl FromStr for DocRef {
    type Err = DocRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DocRefParseError(s.to_string());
        let mut parts = s.splitn(2, '-');
        let doc = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(err)?;
        let section = match parts.next() {
            Some(p) => Some(p.parse::<u32>().map_err(|_| err())?),
            None => None,
        };
        Ok(DocRef {
            doc_id: DocId(doc),
            section_id: section,
        })
    }
}

impl Serialize for DocRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// Searchable document fields.
///
/// The derived `Ord` is only for deterministic map ordering; boosts live in
/// the oracle's field configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Name,
    Text,
    Component,
    Keyword,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Name,
        Field::Text,
        Field::Component,
        Field::Keyword,
    ];

    /// Matches the serde `rename_all = "lowercase"` convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Name => "name",
            Field::Text => "text",
            Field::Component => "component",
            Field::Keyword => "keyword",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MATCHES AND SEGMENTS
// =============================================================================

/// A span inside one field of one document, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchPosition {
    pub start: usize,
    pub length: usize,
}

impl MatchPosition {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Non-empty and inside a field of `text_len` characters.
    #[inline]
    pub fn is_valid_for(&self, text_len: usize) -> bool {
        self.length > 0 && self.start.checked_add(self.length).is_some_and(|end| end <= text_len)
    }
}

/// Whether a segment is ordinary text or a highlighted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Plain,
    Marked,
}

/// One run of display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Plain,
            text: text.into(),
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Marked,
            text: text.into(),
        }
    }

    pub fn is_marked(&self) -> bool {
        self.kind == SegmentKind::Marked
    }
}

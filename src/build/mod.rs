// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index build: documents in, two payloads out.
//!
//! The input is either a single store JSON file (`{"documents": {...},
//! "componentVersions": {...}}`) or a directory with a `manifest.json` listing
//! one JSON file per document. Either way we end up with a [`DocumentStore`]
//! and derive from it:
//!
//! 1. a [`MemoryIndex`] over every document plus one ref per section title;
//! 2. a trie of every indexed word, each carrying the ids of the documents it
//!    occurs in (one payload per document, however often the word appears).
//!
//! Words longer than [`MAX_WORD_CHARS`] stay out of the trie. Nobody types
//! them, and every trie level nests the JSON three deep, which a payload
//! parser will only follow so far.

pub mod manifest;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::BuildError;
use crate::fuzzy::{Trie, TrieBuilder};
use crate::oracle::{default_fields, FieldSpec, MemoryIndex};
use crate::payload::{encode, IndexPayload, PayloadKind};
use crate::store::{Document, DocumentStore};
use crate::types::DocId;
use crate::util::tokenize;

pub use manifest::InputManifest;

/// Longest word that goes into the trie.
pub const MAX_WORD_CHARS: usize = 40;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Distinct trie words of one document: title, name, keyword, component,
/// body text and section titles, normalized.
pub fn trie_words(doc: &Document) -> BTreeSet<String> {
    let texts = [
        Some(doc.title.as_str()),
        doc.name.as_deref(),
        doc.keyword.as_deref(),
        doc.component.as_deref(),
        Some(doc.text.as_str()),
    ];
    texts
        .into_iter()
        .flatten()
        .chain(doc.titles.iter().map(|t| t.text.as_str()))
        .flat_map(tokenize)
        .map(|token| token.term)
        .filter(|term| term.chars().count() <= MAX_WORD_CHARS)
        .collect()
}

pub fn build_trie(store: &DocumentStore) -> Trie<DocId> {
    let mut builder = TrieBuilder::new();
    for doc in store.iter() {
        for word in trie_words(doc) {
            builder.insert(&word, doc.id);
        }
    }
    builder.build()
}

pub fn build_index(store: &DocumentStore, fields: Vec<FieldSpec>) -> MemoryIndex {
    let docs: Vec<&Document> = store.iter().collect();
    MemoryIndex::with_sections(fields, &docs)
}

/// Encoded index and trie payloads for `store`.
pub fn build_payloads(
    store: DocumentStore,
    fields: Vec<FieldSpec>,
) -> Result<(Vec<u8>, Vec<u8>), BuildError> {
    let trie = build_trie(&store);
    let index = build_index(&store, fields);
    let trie_bytes = encode(&trie, PayloadKind::Trie)?;
    let index_bytes = encode(&IndexPayload { index, store }, PayloadKind::Index)?;
    Ok((index_bytes, trie_bytes))
}

// =============================================================================
// LOADING
// =============================================================================

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BuildError> {
    let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| BuildError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every document the manifest lists, sorted by id.
pub fn load_documents(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<Document>, BuildError> {
    #[cfg(feature = "parallel")]
    let files = manifest.documents.par_iter();
    #[cfg(not(feature = "parallel"))]
    let files = manifest.documents.iter();

    let mut docs = files
        .map(|file| read_json::<Document>(&input_dir.join(file)))
        .collect::<Result<Vec<Document>, BuildError>>()?;
    docs.sort_by_key(|d| d.id);
    Ok(docs)
}

/// Store plus field configuration from a store file or a manifest directory.
pub fn load_input(input: &Path) -> Result<(DocumentStore, Vec<FieldSpec>), BuildError> {
    if input.is_file() {
        return Ok((read_json(input)?, default_fields()));
    }

    let manifest: InputManifest = read_json(&input.join(MANIFEST_FILE))?;
    let mut store = DocumentStore::new();
    store.component_versions = manifest.component_versions.clone();
    for doc in load_documents(input, &manifest)? {
        let id = doc.id;
        if store.insert(doc).is_some() {
            return Err(BuildError::DuplicateDocument(id));
        }
    }
    Ok((store, manifest.fields))
}

// =============================================================================
// BUILD
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Draw a progress spinner on stderr.
    pub progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub documents: usize,
    pub index_bytes: usize,
    pub trie_bytes: usize,
    pub took: Duration,
}

#[cfg(feature = "parallel")]
fn spinner(enabled: bool, message: &'static str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} {msg}") {
        pb.set_style(style);
    }
    pb.set_prefix("Building");
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Read `input`, write both payloads into `output_dir`.
pub fn run_build(input: &Path, output_dir: &Path, options: BuildOptions) -> Result<BuildReport, BuildError> {
    let start = Instant::now();

    #[cfg(feature = "parallel")]
    let pb = spinner(options.progress, "loading documents...");
    #[cfg(not(feature = "parallel"))]
    let _ = options;

    let (store, fields) = load_input(input)?;
    let documents = store.len();
    if documents == 0 {
        warn!("no documents in {}; writing empty payloads", input.display());
    }

    #[cfg(feature = "parallel")]
    if let Some(pb) = &pb {
        pb.set_message(format!("indexing {} documents...", documents));
    }

    let (index_bytes, trie_bytes) = build_payloads(store, fields)?;

    fs::create_dir_all(output_dir).map_err(|source| BuildError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;
    for (kind, bytes) in [
        (PayloadKind::Index, &index_bytes),
        (PayloadKind::Trie, &trie_bytes),
    ] {
        let path = output_dir.join(kind.file_name());
        fs::write(&path, bytes).map_err(|source| BuildError::Write { path, source })?;
    }

    #[cfg(feature = "parallel")]
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let report = BuildReport {
        documents,
        index_bytes: index_bytes.len(),
        trie_bytes: trie_bytes.len(),
        took: start.elapsed(),
    };
    info!(
        "built {} documents: index {} bytes, trie {} bytes",
        report.documents, report.index_bytes, report.trie_bytes
    );
    Ok(report)
}

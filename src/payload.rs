// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Serialized payloads: what `build` writes and a session loads.
//!
//! Two files, same envelope:
//!
//! ```text
//! ┌─────────────────────────────┬──────────────────┬──────────────┐
//! │ brotli(JSON)                │ CRC32 (u32 LE)   │ magic "SLTH" │
//! └─────────────────────────────┴──────────────────┴──────────────┘
//!                                 of the JSON bytes   4 bytes
//! ```
//!
//! The index payload's JSON is `{"index": <oracle>, "store": <store>}`; the
//! trie payload's is the trie node tree. The checksum covers the decompressed
//! JSON so it catches corruption brotli itself would decode without complaint.
//! If the footer is wrong, something got corrupted or truncated. Don't trust
//! the data.

use std::fmt;
use std::io::{Read, Write};

use crc32fast::Hasher as Crc32Hasher;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, LoadError};
use crate::store::DocumentStore;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Footer magic: "SLTH".
pub const FOOTER_MAGIC: [u8; 4] = *b"SLTH";

/// 4 bytes CRC32 + 4 bytes magic.
pub const FOOTER_SIZE: usize = 8;

/// Maximum payload size on either side of compression: 100 MB.
pub const MAX_PAYLOAD_SIZE: usize = 100 * 1024 * 1024;

const BROTLI_BUFFER: usize = 4096;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_WINDOW: u32 = 22;

/// Which payload a codec error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Index,
    Trie,
}

impl PayloadKind {
    /// File name `build` writes this payload to.
    pub fn file_name(self) -> &'static str {
        match self {
            PayloadKind::Index => "search-index.json.br",
            PayloadKind::Trie => "search-trie.json.br",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PayloadKind::Index => "index",
            PayloadKind::Trie => "trie",
        })
    }
}

/// Body of the index payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPayload<O> {
    pub index: O,
    pub store: DocumentStore,
}

pub fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

// ============================================================================
// ENCODE
// ============================================================================

/// Serialize, compress and seal `value`.
pub fn encode<T: Serialize>(value: &T, kind: PayloadKind) -> Result<Vec<u8>, BuildError> {
    let json = serde_json::to_vec(value).map_err(|source| BuildError::Encode { kind, source })?;

    let mut out = Vec::with_capacity(json.len() / 4 + FOOTER_SIZE);
    {
        let mut encoder =
            brotli::CompressorWriter::new(&mut out, BROTLI_BUFFER, BROTLI_QUALITY, BROTLI_WINDOW);
        encoder
            .write_all(&json)
            .and_then(|()| encoder.flush())
            .map_err(|source| BuildError::Compress { kind, source })?;
    }

    out.extend_from_slice(&compute_crc32(&json).to_le_bytes());
    out.extend_from_slice(&FOOTER_MAGIC);
    Ok(out)
}

// ============================================================================
// DECODE
// ============================================================================

/// Check the footer, decompress, verify the checksum and parse.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], kind: PayloadKind) -> Result<T, LoadError> {
    let json = decode_json(bytes, kind)?;
    serde_json::from_slice(&json).map_err(|source| LoadError::Parse { kind, source })
}

/// The verified JSON bytes of a payload.
pub fn decode_json(bytes: &[u8], kind: PayloadKind) -> Result<Vec<u8>, LoadError> {
    if bytes.len() < FOOTER_SIZE {
        return Err(LoadError::Truncated {
            kind,
            len: bytes.len(),
        });
    }
    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(LoadError::TooLarge {
            kind,
            len: bytes.len(),
        });
    }

    let footer_start = bytes.len() - FOOTER_SIZE;
    if bytes[footer_start + 4..] != FOOTER_MAGIC {
        return Err(LoadError::BadMagic { kind });
    }
    let expected = u32::from_le_bytes([
        bytes[footer_start],
        bytes[footer_start + 1],
        bytes[footer_start + 2],
        bytes[footer_start + 3],
    ]);

    let mut json = Vec::new();
    brotli::Decompressor::new(&bytes[..footer_start], BROTLI_BUFFER)
        .take(MAX_PAYLOAD_SIZE as u64 + 1)
        .read_to_end(&mut json)
        .map_err(|source| LoadError::Decompress { kind, source })?;
    if json.len() > MAX_PAYLOAD_SIZE {
        return Err(LoadError::TooLarge {
            kind,
            len: json.len(),
        });
    }

    let actual = compute_crc32(&json);
    if actual != expected {
        return Err(LoadError::ChecksumMismatch {
            kind,
            expected,
            actual,
        });
    }
    Ok(json)
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for payload decoding.
//!
//! Arbitrary bytes must be rejected with an error, never a panic or an
//! unbounded allocation. Bytes that decode must be a payload some encoder
//! could have produced.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sleuth::fuzzy::Trie;
use sleuth::payload::{decode, encode, IndexPayload, PayloadKind};
use sleuth::types::DocId;
use sleuth::MemoryIndex;

fuzz_target!(|data: &[u8]| {
    if let Ok(trie) = decode::<Trie<DocId>>(data, PayloadKind::Trie) {
        let again = encode(&trie, PayloadKind::Trie).unwrap();
        assert_eq!(decode::<Trie<DocId>>(&again, PayloadKind::Trie).unwrap(), trie);
    }
    let _ = decode::<IndexPayload<MemoryIndex>>(data, PayloadKind::Index);
});

//! Payload envelopes: what build writes, decode must read back or reject.

use sleuth::build::{build_payloads, build_trie};
use sleuth::fuzzy::Trie;
use sleuth::oracle::{default_fields, MemoryIndex};
use sleuth::payload::{decode, IndexPayload, PayloadKind, FOOTER_MAGIC, FOOTER_SIZE};
use sleuth::types::DocId;
use sleuth::LoadError;

use super::common::docs_store;

fn payloads() -> (Vec<u8>, Vec<u8>) {
    build_payloads(docs_store(), default_fields()).unwrap()
}

#[test]
fn test_index_payload_round_trip() {
    let (index, _) = payloads();
    let payload: IndexPayload<MemoryIndex> = decode(&index, PayloadKind::Index).unwrap();
    assert_eq!(payload.store, docs_store());
    assert_eq!(payload.index.len(), 5);
}

#[test]
fn test_trie_payload_round_trip() {
    let (_, trie) = payloads();
    let decoded: Trie<DocId> = decode(&trie, PayloadKind::Trie).unwrap();
    assert_eq!(decoded, build_trie(&docs_store()));
    assert_eq!(decoded.get("indexer"), Some(&[DocId(1), DocId(2), DocId(4)][..]));
}

#[test]
fn test_footer_layout() {
    let (index, _) = payloads();
    assert_eq!(&index[index.len() - 4..], &FOOTER_MAGIC);
    assert!(index.len() > FOOTER_SIZE);
}

#[test]
fn test_every_truncation_is_rejected() {
    let (_, trie) = payloads();
    for len in [0, 3, FOOTER_SIZE, trie.len() / 2, trie.len() - 1] {
        let result = decode::<Trie<DocId>>(&trie[..len], PayloadKind::Trie);
        assert!(result.is_err(), "accepted a {}-byte prefix", len);
    }
}

#[test]
fn test_flipped_body_byte_is_rejected() {
    let (index, _) = payloads();
    let mut corrupt = index.clone();
    corrupt[0] ^= 0x55;
    let err = decode::<IndexPayload<MemoryIndex>>(&corrupt, PayloadKind::Index).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Decompress { .. } | LoadError::ChecksumMismatch { .. } | LoadError::Parse { .. }
    ));
}

#[test]
fn test_swapped_payloads_fail_to_parse() {
    let (index, trie) = payloads();
    assert!(matches!(
        decode::<Trie<DocId>>(&index, PayloadKind::Trie),
        Err(LoadError::Parse { .. })
    ));
    assert!(matches!(
        decode::<IndexPayload<MemoryIndex>>(&trie, PayloadKind::Index),
        Err(LoadError::Parse { .. })
    ));
}

//! Highlighting: segments stay inside the text and read back contiguously.

use proptest::prelude::*;
use sleuth::types::{MatchPosition, Segment, SegmentKind, ELLIPSIS};
use sleuth::build_highlighted;

use super::oracles::sentence;

fn joined(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Spans that may be empty, overlapping or past the end.
fn positions() -> impl Strategy<Value = Vec<MatchPosition>> {
    prop::collection::vec(
        (0usize..120, 0usize..12).prop_map(|(start, length)| MatchPosition::new(start, length)),
        0..6,
    )
}

proptest! {
    #[test]
    fn prop_excerpt_without_positions(text in sentence(), n in 0usize..80) {
        let segments = build_highlighted(&text, &[], n);
        let len = text.chars().count();

        prop_assert_eq!(segments.len(), 1);
        prop_assert_eq!(segments[0].kind, SegmentKind::Plain);
        let shown = &segments[0].text;
        let cut = n < len;
        prop_assert_eq!(shown.ends_with(ELLIPSIS), cut);
        let body = if cut { &shown[..shown.len() - ELLIPSIS.len()] } else { shown.as_str() };
        prop_assert_eq!(body.chars().count(), n.min(len));
        prop_assert!(text.starts_with(body));
    }

    #[test]
    fn prop_segments_read_back_as_one_substring(
        text in sentence(),
        positions in positions(),
        n in 0usize..60,
    ) {
        let segments = build_highlighted(&text, &positions, n);
        let all = joined(&segments);
        let inner = all.strip_prefix(ELLIPSIS).unwrap_or(&all);
        let inner = inner.strip_suffix(ELLIPSIS).unwrap_or(inner);
        prop_assert!(
            text.contains(inner),
            "{:?} is not a substring of {:?}",
            inner,
            text
        );
    }

    #[test]
    fn prop_marked_segments_are_valid_spans(
        text in sentence(),
        positions in positions(),
        n in 0usize..60,
    ) {
        let len = text.chars().count();
        let any_valid = positions.iter().any(|p| p.is_valid_for(len));
        let segments = build_highlighted(&text, &positions, n);

        for segment in segments.iter().filter(|s| s.is_marked()) {
            prop_assert!(!segment.text.is_empty());
            prop_assert!(text.contains(segment.text.as_str()));
        }
        if !any_valid {
            prop_assert!(segments.iter().all(|s| !s.is_marked()));
        }
    }

    #[test]
    fn prop_unwindowed_segments_cover_text(
        text in sentence(),
        positions in positions(),
    ) {
        // Without windowing every character shows up exactly once.
        let segments = build_highlighted(&text, &positions, 0);
        let len = text.chars().count();
        if positions.iter().any(|p| p.is_valid_for(len)) {
            prop_assert_eq!(joined(&segments), text);
        }
    }
}

#[test]
fn test_window_example() {
    let text = "The quick brown fox jumps over the lazy dog";
    let segments = build_highlighted(text, &[MatchPosition::new(4, 5)], 10);
    let parts: Vec<(SegmentKind, &str)> = segments.iter().map(|s| (s.kind, s.text.as_str())).collect();
    assert_eq!(
        parts,
        vec![
            (SegmentKind::Plain, "The "),
            (SegmentKind::Marked, "quick"),
            (SegmentKind::Plain, " brown fox..."),
        ]
    );
}

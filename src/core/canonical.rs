// src/core/canonical.rs
use crate::core::types::{CanonicalMatch, CanonicalSequence};

/// First canonical sequence, in dictionary order, that equals `glyphs` or
/// overlaps it by containment in either direction. Containment hits are
/// marked `partial`.
///
/// An empty `glyphs` is contained in every sequence and so partially
/// matches the first one.
pub fn match_canonical(sequences: &[CanonicalSequence], glyphs: &str) -> Option<CanonicalMatch> {
    sequences.iter().find_map(|seq| {
        if seq.sequence == glyphs {
            Some(CanonicalMatch { sequence: seq.clone(), partial: false })
        } else if seq.sequence.contains(glyphs) || glyphs.contains(seq.sequence.as_str()) {
            Some(CanonicalMatch { sequence: seq.clone(), partial: true })
        } else {
            None
        }
    })
}

// src/core/decoder.rs
//! Glyph → text translation.

use crate::config::EngineConfig;
use crate::core::index::GlyphIndex;
use crate::core::types::{ReverseTranslation, Segment};

/// Greedy longest-glyph decoding. Unknown input is skipped one Unicode
/// scalar value at a time, so every byte ends up either in a segment or in
/// `unrecognized`.
pub fn translate(
    index: &GlyphIndex,
    config: &EngineConfig,
    glyph_string: &str,
    lang: &str,
) -> ReverseTranslation {
    let mut segments = Vec::new();
    let mut unrecognized = Vec::new();
    let mut remaining = glyph_string;

    while let Some(c) = remaining.chars().next() {
        match index.longest_glyph_prefix(remaining) {
            Some((meaning, len)) => {
                segments.push(Segment {
                    glyph: meaning.glyph.clone(),
                    meaning: meaning.gloss(lang, &config.fallback_lang).to_string(),
                });
                remaining = &remaining[len..];
            }
            None => {
                unrecognized.push(c.to_string());
                remaining = &remaining[c.len_utf8()..];
            }
        }
    }

    let text = segments
        .iter()
        .map(|s| s.meaning.as_str())
        .collect::<Vec<_>>()
        .join(&config.separator);

    tracing::debug!(
        segments = segments.len(),
        unrecognized = unrecognized.len(),
        "glyphs translated to text"
    );

    ReverseTranslation { text, segments, unrecognized }
}

// src/core/converter.rs
//! Text → glyph translation.

use crate::config::EngineConfig;
use crate::core::index::GlyphIndex;
use crate::core::tokenizer::{token_len, tokenize};
use crate::core::types::{ForwardTranslation, GlyphId, Match, MISSING_GLOSS};

/// Windows matched against the keyword index, plus which token positions
/// they consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    /// Ordered by token position.
    pub matches: Vec<Match>,
    pub consumed: Vec<bool>,
}

impl Coverage {
    pub fn consumed_count(&self) -> usize {
        self.consumed.iter().filter(|&&c| c).count()
    }
}

/// Greedy phrase matching: widest window first, left to right within a
/// width. A window is skipped if any of its positions is already consumed,
/// so wider and earlier windows win.
pub fn match_phrases(index: &GlyphIndex, words: &[String], max_window: usize) -> Coverage {
    let mut consumed = vec![false; words.len()];
    let mut matches = Vec::new();

    for window in (1..=max_window.min(words.len())).rev() {
        for start in 0..=words.len() - window {
            let span = start..start + window;
            if consumed[span.clone()].iter().any(|&c| c) {
                continue;
            }
            let phrase = words[span.clone()].join(" ");
            if let Some(best) = index.best_candidate(&phrase) {
                matches.push(Match {
                    glyph_id: best.glyph_id,
                    weight: best.weight * window as f64,
                    position: start,
                    source_phrase: phrase,
                });
                consumed[span].fill(true);
            }
        }
    }

    // Window sizes were scanned widest first; restore text order.
    matches.sort_by_key(|m| m.position);
    Coverage { matches, consumed }
}

/// Drops a glyph equal to the one right before it.
pub fn dedup_adjacent(matches: &[Match]) -> Vec<GlyphId> {
    let mut glyphs: Vec<GlyphId> = matches.iter().map(|m| m.glyph_id).collect();
    glyphs.dedup();
    glyphs
}

/// Percentage of significant words consumed, capped at 100.
pub fn confidence(consumed: usize, significant: usize) -> u8 {
    if significant == 0 {
        return 0;
    }
    let pct = (100.0 * consumed as f64 / significant as f64).round();
    pct.min(100.0) as u8
}

pub fn translate(
    index: &GlyphIndex,
    config: &EngineConfig,
    text: &str,
    lang: &str,
) -> ForwardTranslation {
    let words = tokenize(text);
    let coverage = match_phrases(index, &words, config.max_window);

    let is_significant = |w: &str| token_len(w) >= config.significant_word_len;
    let unmatched: Vec<String> = words
        .iter()
        .zip(&coverage.consumed)
        .filter(|(w, used)| !**used && is_significant(w.as_str()))
        .map(|(w, _)| w.clone())
        .collect();
    let significant = words.iter().filter(|w| is_significant(w.as_str())).count();
    let confidence = confidence(coverage.consumed_count(), significant);

    let glyph_ids = dedup_adjacent(&coverage.matches);
    let mut glyphs = String::new();
    let mut gloss = Vec::with_capacity(glyph_ids.len());
    for &id in &glyph_ids {
        match index.meaning(id) {
            Some(meaning) => {
                glyphs.push_str(&meaning.glyph);
                gloss.push(meaning.gloss(lang, &config.fallback_lang).to_string());
            }
            None => gloss.push(MISSING_GLOSS.to_string()),
        }
    }

    if confidence < config.uncertainty_threshold && !glyphs.is_empty() {
        glyphs.push_str(&config.uncertainty_marker);
    }

    tracing::debug!(
        words = words.len(),
        matches = coverage.matches.len(),
        confidence,
        "text translated to glyphs"
    );

    ForwardTranslation {
        glyphs,
        gloss,
        confidence,
        unmatched,
        match_count: glyph_ids.len(),
    }
}

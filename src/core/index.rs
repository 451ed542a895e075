// src/core/index.rs
use crate::core::dictionary::Dictionary;
use crate::core::trie::GlyphTrie;
use crate::core::types::{GlyphId, GlyphMeaning, KeywordCandidate};
use std::collections::HashMap;

/// Lookup structures derived from a [`Dictionary`]: glyph → meaning,
/// keyword phrase → weighted candidates, and a trie for prefix decoding.
#[derive(Debug, Clone, Default)]
pub struct GlyphIndex {
    meanings: Vec<GlyphMeaning>,
    by_glyph: HashMap<String, GlyphId>,
    keywords: HashMap<String, Vec<KeywordCandidate>>,
    trie: GlyphTrie,
}

impl GlyphIndex {
    pub fn build(dictionary: &Dictionary) -> Self {
        let mut index = Self::default();

        for category in &dictionary.categories {
            for entry in &category.glyphs {
                let meaning = GlyphMeaning {
                    glyph: entry.glyph.clone(),
                    category: category.name.clone(),
                    glosses: entry.glosses.clone(),
                };

                // A symbol seen twice keeps its id; the later entry's meaning wins.
                let glyph_id = match index.by_glyph.get(&entry.glyph) {
                    Some(&id) => {
                        tracing::warn!(
                            glyph = %entry.glyph,
                            previous = %index.meanings[id].category,
                            category = %category.name,
                            "duplicate glyph symbol, keeping the later meaning"
                        );
                        index.meanings[id] = meaning;
                        id
                    }
                    None => {
                        let id = index.meanings.len();
                        index.meanings.push(meaning);
                        index.by_glyph.insert(entry.glyph.clone(), id);
                        index.trie.insert(&entry.glyph, id);
                        id
                    }
                };

                if entry.keywords.is_empty() {
                    continue;
                }
                let weight = 1.0 / entry.keywords.len() as f64;
                for keyword in &entry.keywords {
                    index
                        .keywords
                        .entry(keyword.to_lowercase())
                        .or_default()
                        .push(KeywordCandidate { glyph_id, weight });
                }
            }
        }

        tracing::info!(
            entries = dictionary.glyph_count(),
            glyphs = index.meanings.len(),
            keywords = index.keywords.len(),
            trie_nodes = index.trie.node_count(),
            "glyph index built"
        );
        index
    }

    pub fn meaning(&self, glyph_id: GlyphId) -> Option<&GlyphMeaning> {
        self.meanings.get(glyph_id)
    }

    pub fn lookup_glyph(&self, glyph: &str) -> Option<&GlyphMeaning> {
        self.by_glyph.get(glyph).and_then(|&id| self.meanings.get(id))
    }

    /// All candidates registered for a lowercase phrase, in insertion order.
    pub fn candidates(&self, phrase: &str) -> &[KeywordCandidate] {
        self.keywords.get(phrase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The highest-weight candidate for `phrase`. Among equal weights the
    /// one registered last is returned.
    pub fn best_candidate(&self, phrase: &str) -> Option<KeywordCandidate> {
        self.candidates(phrase)
            .iter()
            .copied()
            .reduce(|best, next| if best.weight > next.weight { best } else { next })
    }

    /// The longest known glyph that prefixes `input`, with its byte length.
    pub fn longest_glyph_prefix(&self, input: &str) -> Option<(&GlyphMeaning, usize)> {
        self.trie
            .longest_prefix(input)
            .and_then(|(id, len)| self.meanings.get(id).map(|m| (m, len)))
    }

    pub fn glyph_count(&self) -> usize {
        self.meanings.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

// src/core/types.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Index of a glyph symbol in the engine's meaning store.
pub type GlyphId = usize;

/// One glyph symbol as it appears in a dictionary category.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphEntry {
    pub glyph: String,
    /// Gloss strings keyed by language code, e.g. `en` and `zh`.
    pub glosses: BTreeMap<String, String>,
    /// Natural-language terms that trigger this glyph. May be empty.
    pub keywords: Vec<String>,
}

/// A named group of glyphs, in dictionary order.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub glyphs: Vec<GlyphEntry>,
}

/// A predefined multi-glyph sequence. Everything except `sequence` is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSequence {
    pub sequence: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// The meaning registered for a glyph symbol in the reverse index.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMeaning {
    pub glyph: String,
    pub category: String,
    pub glosses: BTreeMap<String, String>,
}

/// Placeholder gloss when neither the requested nor the fallback language exists.
pub const MISSING_GLOSS: &str = "?";

impl GlyphMeaning {
    /// Requested language, then `fallback`, then [`MISSING_GLOSS`].
    /// An empty string counts as absent.
    pub fn gloss(&self, lang: &str, fallback: &str) -> &str {
        self.non_empty_gloss(lang)
            .or_else(|| self.non_empty_gloss(fallback))
            .unwrap_or(MISSING_GLOSS)
    }

    fn non_empty_gloss(&self, lang: &str) -> Option<&str> {
        self.glosses
            .get(lang)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// A glyph that a keyword phrase can produce, with its per-entry weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordCandidate {
    pub glyph_id: GlyphId,
    /// `1 / number of keywords on the entry`.
    pub weight: f64,
}

/// A matched window from the forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub glyph_id: GlyphId,
    /// Candidate weight multiplied by the window size.
    pub weight: f64,
    /// Token index where the window starts.
    pub position: usize,
    pub source_phrase: String,
}

/// Result of translating text into glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardTranslation {
    pub glyphs: String,
    pub gloss: Vec<String>,
    pub confidence: u8,
    pub unmatched: Vec<String>,
    pub match_count: usize,
}

/// One decoded glyph and its meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub glyph: String,
    pub meaning: String,
}

/// Result of translating glyphs back into text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReverseTranslation {
    pub text: String,
    pub segments: Vec<Segment>,
    pub unrecognized: Vec<String>,
}

/// A canonical sequence hit. `partial` is omitted from JSON on exact hits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalMatch {
    #[serde(flatten)]
    pub sequence: CanonicalSequence,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
}

/// Glyph symbols of one category, for rendering a symbol picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteCategory {
    pub name: String,
    pub glyphs: Vec<String>,
}

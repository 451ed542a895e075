use crate::config::EngineConfig;
use crate::core::dictionary::Dictionary;
use crate::core::index::GlyphIndex;
use crate::core::types::{
    CanonicalMatch, ForwardTranslation, GlyphMeaning, PaletteCategory, ReverseTranslation,
};
use crate::core::{canonical, converter, decoder};
use crate::error::Result;
use std::path::Path;

/// The translation engine. Owns the dictionary and the indices built from
/// it; every query is a read, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct GlyphEngine {
    dictionary: Dictionary,
    index: GlyphIndex,
    config: EngineConfig,
}

impl GlyphEngine {
    pub fn new(dictionary: Dictionary) -> Self {
        let index = GlyphIndex::build(&dictionary);
        Self { dictionary, index, config: EngineConfig::default() }
    }

    pub fn with_config(dictionary: Dictionary, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let index = GlyphIndex::build(&dictionary);
        Ok(Self { dictionary, index, config })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(Dictionary::from_json_str(json)?))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(Dictionary::load(path)?))
    }

    /// Loads the dictionary at `path`, or builds an empty engine if that
    /// fails. The empty engine has no palette and scores everything 0.
    pub fn from_file_or_empty(path: &Path) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "dictionary load failed, using empty dictionary");
            Self::new(Dictionary::empty())
        })
    }

    pub fn text_to_glyph(&self, text: &str, lang: &str) -> ForwardTranslation {
        converter::translate(&self.index, &self.config, text, lang)
    }

    pub fn glyph_to_text(&self, glyphs: &str, lang: &str) -> ReverseTranslation {
        decoder::translate(&self.index, &self.config, glyphs, lang)
    }

    pub fn match_canonical(&self, glyphs: &str) -> Option<CanonicalMatch> {
        canonical::match_canonical(&self.dictionary.canonical, glyphs)
    }

    /// Glyph symbols grouped by category, in dictionary order.
    pub fn glyph_palette(&self) -> Vec<PaletteCategory> {
        self.dictionary
            .categories
            .iter()
            .map(|c| PaletteCategory {
                name: c.name.clone(),
                glyphs: c.glyphs.iter().map(|g| g.glyph.clone()).collect(),
            })
            .collect()
    }

    pub fn lookup_glyph(&self, glyph: &str) -> Option<&GlyphMeaning> {
        self.index.lookup_glyph(glyph)
    }
}

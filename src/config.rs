// File: src/config.rs
use crate::error::{GlyphError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Appended to low-confidence forward output: brain + warning sign.
pub const UNCERTAINTY_MARKER: &str = "\u{1F9E0}\u{26A0}\u{FE0F}";
pub const ARROW_SEPARATOR: &str = " → ";
pub const DEFAULT_LANG: &str = "en";

/// Tunables for the translation engine. Defaults reproduce the reference
/// behavior exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest phrase window, in words.
    pub max_window: usize,
    /// Tokens shorter than this never count as significant or unmatched.
    pub significant_word_len: usize,
    /// Forward output below this confidence gets the uncertainty marker.
    pub uncertainty_threshold: u8,
    pub uncertainty_marker: String,
    /// Joins meanings in reverse output and gloss lines.
    pub separator: String,
    pub fallback_lang: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_window: 4,
            significant_word_len: 3,
            uncertainty_threshold: 50,
            uncertainty_marker: UNCERTAINTY_MARKER.to_string(),
            separator: ARROW_SEPARATOR.to_string(),
            fallback_lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_window == 0 {
            return Err(GlyphError::Config("max_window must be at least 1".into()));
        }
        if self.uncertainty_threshold > 100 {
            return Err(GlyphError::Config("uncertainty_threshold must be within 0..=100".into()));
        }
        Ok(())
    }
}

/// Settings for the command-line hosts, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub dictionary_path: Option<PathBuf>,
    pub default_lang: String,
    pub state_path: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            default_lang: DEFAULT_LANG.to_string(),
            state_path: None,
            engine: EngineConfig::default(),
        }
    }
}

impl HostConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: HostConfig = serde_json::from_str(&content)?;
        config.engine.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GlyphError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("glyph-translator"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Configured session file, or `session.bin` next to the config.
    pub fn resolved_state_path(&self) -> Result<PathBuf> {
        match &self.state_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("session.bin")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_window, 4);
        assert_eq!(config.significant_word_len, 3);
        assert_eq!(config.uncertainty_threshold, 50);
        assert_eq!(config.uncertainty_marker, "🧠⚠️");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let config = EngineConfig { max_window: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(GlyphError::Config(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = HostConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_full_file_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = HostConfig {
            dictionary_path: Some(PathBuf::from("/tmp/glyph-dictionary.json")),
            default_lang: "zh".into(),
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(HostConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "default_lang": "zh", "engine": { "max_window": 2 } }"#).unwrap();
        let config = HostConfig::load_from(&path).unwrap();
        assert_eq!(config.default_lang, "zh");
        assert_eq!(config.engine.max_window, 2);
        assert_eq!(config.engine.uncertainty_threshold, 50);
    }

    #[test]
    fn test_invalid_engine_section_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "engine": { "max_window": 0 } }"#).unwrap();
        assert!(matches!(HostConfig::load_from(&path), Err(GlyphError::Config(_))));
    }
}

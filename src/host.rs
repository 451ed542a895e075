// File: src/host.rs
//! Session handling for interactive hosts: translation mode, language
//! choice, and how a result is rendered for display or copying.

use crate::config::DEFAULT_LANG;
use crate::core::engine::GlyphEngine;
use crate::core::types::{ForwardTranslation, ReverseTranslation};
use serde::{Deserialize, Serialize};

pub const NO_MATCHES: &str = "🧠⚠️ No matches found";
pub const NO_RECOGNIZED_GLYPHS: &str = "No recognized glyphs";
const DISPLAY_SEPARATOR: &str = " → ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    TextToGlyph,
    GlyphToText,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::TextToGlyph => Mode::GlyphToText,
            Mode::GlyphToText => Mode::TextToGlyph,
        }
    }

    pub fn input_label(self) -> &'static str {
        match self {
            Mode::TextToGlyph => "Enter text",
            Mode::GlyphToText => "Enter glyphs",
        }
    }

    pub fn output_label(self) -> &'static str {
        match self {
            Mode::TextToGlyph => "Glyph output",
            Mode::GlyphToText => "Text output",
        }
    }
}

/// Badge shown next to a forward result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Normal,
}

impl ConfidenceLevel {
    pub fn for_confidence(confidence: u8) -> Self {
        if confidence < 30 {
            ConfidenceLevel::VeryLow
        } else if confidence < 60 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::Normal
        }
    }
}

/// Host-facing state that survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: Mode,
    pub lang: String,
    pub input: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { mode: Mode::default(), lang: DEFAULT_LANG.to_string(), input: String::new() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Forward(ForwardTranslation),
    Reverse(ReverseTranslation),
}

/// Display strings for one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    pub confidence: Option<(u8, ConfidenceLevel)>,
    pub gloss: Option<String>,
    pub unmatched: Option<String>,
}

impl Outcome {
    pub fn render(&self) -> Rendered {
        match self {
            Outcome::Forward(result) => {
                let has_glyphs = !result.glyphs.is_empty();
                Rendered {
                    output: if has_glyphs { result.glyphs.clone() } else { NO_MATCHES.to_string() },
                    confidence: has_glyphs.then(|| {
                        (result.confidence, ConfidenceLevel::for_confidence(result.confidence))
                    }),
                    gloss: (!result.gloss.is_empty()).then(|| result.gloss.join(DISPLAY_SEPARATOR)),
                    unmatched: (!result.unmatched.is_empty()).then(|| result.unmatched.join(", ")),
                }
            }
            Outcome::Reverse(result) => Rendered {
                output: if result.text.is_empty() {
                    NO_RECOGNIZED_GLYPHS.to_string()
                } else {
                    result.text.clone()
                },
                confidence: None,
                gloss: None,
                unmatched: (!result.unrecognized.is_empty())
                    .then(|| format!("Unrecognized: {}", result.unrecognized.join(" "))),
            },
        }
    }
}

/// A line typed into an interactive host. Commands are matched on their
/// first word, so `:language` is plain input, not `:lang`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Exit,
    ToggleMode,
    Clear,
    Copy { with_gloss: bool },
    Palette,
    /// `None` shows the current language.
    Lang(Option<&'a str>),
    Canon(&'a str),
    Translate(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let (word, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };
        match (word, arg) {
            ("exit", "") => Command::Exit,
            (":mode", "") => Command::ToggleMode,
            (":clear", "") => Command::Clear,
            (":copy", "") => Command::Copy { with_gloss: false },
            (":copy-gloss", "") => Command::Copy { with_gloss: true },
            (":palette", "") => Command::Palette,
            (":lang", "") => Command::Lang(None),
            (":lang", lang) => Command::Lang(Some(lang)),
            (":canon", glyphs) => Command::Canon(glyphs),
            _ => Command::Translate(line),
        }
    }

    /// Whether running this command changes what [`SessionState`] holds.
    pub fn changes_state(&self) -> bool {
        matches!(
            self,
            Command::ToggleMode | Command::Clear | Command::Lang(Some(_)) | Command::Translate(_)
        )
    }
}

/// One interactive session. The engine is passed in per call; the session
/// only holds what the user chose and the last result.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    last: Option<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: SessionState) -> Self {
        Self { state, last: None }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn lang(&self) -> &str {
        &self.state.lang
    }

    /// Switching mode discards the last result.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.last = None;
    }

    pub fn set_lang(&mut self, lang: &str) {
        self.state.lang = lang.to_string();
    }

    pub fn last(&self) -> Option<&Outcome> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.state.input.clear();
        self.last = None;
    }

    /// Translates `input` in the current mode. Blank input clears the last
    /// result and renders nothing.
    pub fn translate(&mut self, engine: &GlyphEngine, input: &str) -> Option<Rendered> {
        self.state.input = input.to_string();
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.last = None;
            return None;
        }

        let outcome = match self.state.mode {
            Mode::TextToGlyph => Outcome::Forward(engine.text_to_glyph(trimmed, &self.state.lang)),
            Mode::GlyphToText => Outcome::Reverse(engine.glyph_to_text(trimmed, &self.state.lang)),
        };
        let rendered = outcome.render();
        self.last = Some(outcome);
        Some(rendered)
    }

    /// Text for the clipboard. With `with_gloss`, a forward result is
    /// followed by a bracketed gloss line.
    pub fn copy_text(&self, with_gloss: bool) -> Option<String> {
        let outcome = self.last.as_ref()?;
        match outcome {
            Outcome::Forward(result) if with_gloss => Some(format!(
                "{}\n\n[Gloss: {}]",
                result.glyphs,
                result.gloss.join(DISPLAY_SEPARATOR)
            )),
            _ => Some(outcome.render().output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> GlyphEngine {
        GlyphEngine::from_json_str(
            &json!({
                "categories": {
                    "core": {
                        "🧠": { "en": "think", "zh": "思考", "keywords": ["think", "thought"] },
                        "💡": { "en": "idea", "zh": "想法", "keywords": ["idea"] }
                    }
                },
                "sequences": { "canonical": [] }
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_command_words_match_exactly() {
        assert_eq!(Command::parse(" exit "), Command::Exit);
        assert_eq!(Command::parse(":mode"), Command::ToggleMode);
        assert_eq!(Command::parse(":copy-gloss"), Command::Copy { with_gloss: true });
        assert_eq!(Command::parse(":lang"), Command::Lang(None));
        assert_eq!(Command::parse(":lang  zh "), Command::Lang(Some("zh")));
        assert_eq!(Command::parse(":canon 🧠💡"), Command::Canon("🧠💡"));
        assert_eq!(Command::parse(":canon"), Command::Canon(""));

        assert_eq!(Command::parse(":language zh"), Command::Translate(":language zh"));
        assert_eq!(Command::parse(":canonical 🧠"), Command::Translate(":canonical 🧠"));
        assert_eq!(Command::parse(":modes"), Command::Translate(":modes"));
        assert_eq!(Command::parse("exit now"), Command::Translate("exit now"));
        assert_eq!(Command::parse("  I think  "), Command::Translate("  I think  "));
    }

    #[test]
    fn test_state_changing_commands() {
        for line in [":mode", ":clear", ":lang zh", "think", ""] {
            assert!(Command::parse(line).changes_state(), "{}", line);
        }
        for line in ["exit", ":copy", ":copy-gloss", ":palette", ":lang", ":canon 🧠"] {
            assert!(!Command::parse(line).changes_state(), "{}", line);
        }
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::for_confidence(0), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::for_confidence(29), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::for_confidence(30), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::for_confidence(59), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::for_confidence(60), ConfidenceLevel::Normal);
    }

    #[test]
    fn test_forward_render() {
        let mut session = Session::new();
        let rendered = session.translate(&engine(), "  I think, an idea!  ").unwrap();
        assert_eq!(rendered.output, "🧠💡");
        assert_eq!(rendered.confidence, Some((100, ConfidenceLevel::Normal)));
        assert_eq!(rendered.gloss.as_deref(), Some("think → idea"));
        assert_eq!(rendered.unmatched, None);
        assert_eq!(session.state().input, "  I think, an idea!  ");
    }

    #[test]
    fn test_forward_render_without_matches() {
        let mut session = Session::new();
        let rendered = session.translate(&engine(), "nothing relevant").unwrap();
        assert_eq!(rendered.output, NO_MATCHES);
        assert_eq!(rendered.confidence, None);
        assert_eq!(rendered.gloss, None);
        assert_eq!(rendered.unmatched.as_deref(), Some("nothing, relevant"));
    }

    #[test]
    fn test_reverse_render() {
        let mut session = Session::new();
        session.set_mode(Mode::GlyphToText);
        session.set_lang("zh");
        let rendered = session.translate(&engine(), "🧠?💡").unwrap();
        assert_eq!(rendered.output, "思考 → 想法");
        assert_eq!(rendered.confidence, None);
        assert_eq!(rendered.unmatched.as_deref(), Some("Unrecognized: ?"));

        let rendered = session.translate(&engine(), "xy").unwrap();
        assert_eq!(rendered.output, NO_RECOGNIZED_GLYPHS);
        assert_eq!(rendered.unmatched.as_deref(), Some("Unrecognized: x y"));
    }

    #[test]
    fn test_blank_input_clears() {
        let mut session = Session::new();
        session.translate(&engine(), "think").unwrap();
        assert!(session.last().is_some());
        assert!(session.translate(&engine(), "   ").is_none());
        assert!(session.last().is_none());
        assert!(session.copy_text(false).is_none());
    }

    #[test]
    fn test_mode_switch_discards_result() {
        let mut session = Session::new();
        session.translate(&engine(), "think").unwrap();
        session.set_mode(session.mode().toggled());
        assert_eq!(session.mode(), Mode::GlyphToText);
        assert!(session.last().is_none());
    }

    #[test]
    fn test_copy_text() {
        let mut session = Session::new();
        session.translate(&engine(), "think idea").unwrap();
        assert_eq!(session.copy_text(false).as_deref(), Some("🧠💡"));
        assert_eq!(
            session.copy_text(true).as_deref(),
            Some("🧠💡\n\n[Gloss: think → idea]")
        );

        session.set_mode(Mode::GlyphToText);
        session.translate(&engine(), "🧠").unwrap();
        // Reverse results have no gloss line.
        assert_eq!(session.copy_text(true).as_deref(), Some("think"));
    }
}

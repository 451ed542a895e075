// Line protocol host: one command per stdin line, one `RESULT <json>` or
// `ERROR <message>` line per answer on stdout. Logs go to stderr.
use glyph_core::config::HostConfig;
use glyph_core::{Dictionary, GlyphEngine};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn get_dictionary_path(config: &HostConfig) -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.dictionary_path.clone())
        .unwrap_or_else(|| PathBuf::from("glyph-dictionary.json"))
}

fn main() -> glyph_core::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    tracing::info!("glyph simulator starting");

    let config = HostConfig::load().unwrap_or_default();
    let dict_path = get_dictionary_path(&config);
    let dictionary = Dictionary::load(&dict_path).unwrap_or_else(|e| {
        tracing::warn!(path = %dict_path.display(), error = %e, "dictionary load failed, using empty dictionary");
        Dictionary::empty()
    });
    let engine = GlyphEngine::with_config(dictionary, config.engine)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        tracing::debug!(input = ?input, "<-");
        let (command, rest) = split_word(&input);

        let reply = match command {
            "TEXT_TO_GLYPH" => {
                let (lang, text) = split_word(rest);
                to_reply(&engine.text_to_glyph(text, lang))
            }
            "GLYPH_TO_TEXT" => {
                let (lang, glyphs) = split_word(rest);
                to_reply(&engine.glyph_to_text(glyphs, lang))
            }
            "MATCH_CANONICAL" => to_reply(&engine.match_canonical(rest)),
            "PALETTE" => {
                let palette: serde_json::Map<String, serde_json::Value> = engine
                    .glyph_palette()
                    .into_iter()
                    .map(|c| (c.name, serde_json::Value::from(c.glyphs)))
                    .collect();
                to_reply(&palette)
            }
            "EXIT" => {
                tracing::info!("received EXIT");
                break;
            }
            "" => continue,
            other => {
                tracing::warn!(command = other, "unknown command");
                format!("ERROR unknown command {}", other)
            }
        };

        tracing::debug!(reply = ?reply, "->");
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
    }
    tracing::info!("glyph simulator shutting down");
    Ok(())
}

/// Splits off the first space-delimited word. The remainder keeps its
/// inner spacing.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(' ') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    }
}

fn to_reply<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => format!("RESULT {}", json),
        Err(e) => format!("ERROR {}", e),
    }
}

use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use glyph_core::config::HostConfig;
use glyph_core::host::{Command, ConfidenceLevel, Rendered, Session};
use glyph_core::persistence::{load_or_default, save_to_disk};
use glyph_core::{Dictionary, GlyphEngine};
use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};

const DEFAULT_DICTIONARY_PATH: &str = "glyph-dictionary.json";

#[derive(Parser)]
#[command(name = "glyph_translator")]
#[command(about = "Translate between natural-language text and glyph sequences", long_about = None)]
struct Cli {
    /// Dictionary JSON (default: config file, then ./glyph-dictionary.json)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Gloss language, e.g. en or zh
    #[arg(short, long)]
    lang: Option<String>,

    /// Session state file
    #[arg(long)]
    state: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> glyph_core::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = HostConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        HostConfig::default()
    });

    let dictionary_path = cli
        .dictionary
        .or_else(|| config.dictionary_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY_PATH));
    let engine = GlyphEngine::with_config(load_dictionary(&dictionary_path), config.engine.clone())?;

    let state_path = match cli.state {
        Some(path) => path,
        None => config.resolved_state_path()?,
    };
    let mut state = load_or_default(&state_path);
    if !state_path.exists() {
        state.lang = config.default_lang.clone();
    }
    let mut session = Session::from_state(state);
    if let Some(lang) = &cli.lang {
        session.set_lang(lang);
    }

    let mut rendered: Option<Rendered> = None;
    let mut notice = String::new();

    loop {
        print_ui(&session, rendered.as_ref(), &notice)?;
        notice.clear();

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(['\r', '\n']);

        let command = Command::parse(cmd);
        match command {
            Command::Exit => break,
            Command::ToggleMode => {
                session.set_mode(session.mode().toggled());
                rendered = None;
            }
            Command::Clear => {
                session.clear();
                rendered = None;
            }
            Command::Copy { with_gloss } => {
                notice = match session.copy_text(with_gloss) {
                    Some(text) => format!("Copy:\n{}", text),
                    None => "Nothing to copy.".to_string(),
                };
            }
            Command::Palette => notice = palette_text(&engine),
            Command::Lang(None) => notice = format!("Language: {}", session.lang()),
            Command::Lang(Some(lang)) => {
                session.set_lang(lang);
                notice = format!("Language set to '{}'", lang);
            }
            Command::Canon(glyphs) => {
                notice = match engine.match_canonical(glyphs) {
                    Some(hit) => format!(
                        "Canonical{}: {}",
                        if hit.partial { " (partial)" } else { "" },
                        serde_json::to_string(&hit)?
                    ),
                    None => "No canonical sequence matches.".to_string(),
                };
            }
            Command::Translate(line) => rendered = session.translate(&engine, line),
        }

        if command.changes_state() {
            persist(&session, &state_path);
        }
    }

    persist(&session, &state_path);
    Ok(())
}

fn persist(session: &Session, path: &Path) {
    match save_to_disk(session.state(), path) {
        Ok(()) => tracing::debug!(path = %path.display(), "session saved"),
        Err(e) => tracing::error!(path = %path.display(), error = %e, "could not save session"),
    }
}

fn load_dictionary(path: &Path) -> Dictionary {
    Dictionary::load(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "dictionary load failed, using empty dictionary");
        Dictionary::empty()
    })
}

fn palette_text(engine: &GlyphEngine) -> String {
    let palette = engine.glyph_palette();
    if palette.is_empty() {
        return "Palette is empty.".to_string();
    }
    palette
        .iter()
        .map(|c| format!("{:>12}: {}", c.name, c.glyphs.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_ui(session: &Session, rendered: Option<&Rendered>, notice: &str) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let mode = session.mode();
    writeln!(out, "{}", "Glyph Translator".bold())?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(out, "Commands: :mode  :lang <code>  :copy  :copy-gloss  :palette")?;
    writeln!(out, "          :canon <glyphs>  :clear  exit\n")?;
    writeln!(out, "Mode: {}    Language: {}", mode.input_label().cyan(), session.lang().cyan())?;

    if let Some(r) = rendered {
        writeln!(out, "\n{}: {}", mode.output_label(), r.output)?;
        if let Some((confidence, level)) = r.confidence {
            let badge = format!("{}%", confidence);
            let badge = match level {
                ConfidenceLevel::VeryLow => badge.as_str().red(),
                ConfidenceLevel::Low => badge.as_str().yellow(),
                ConfidenceLevel::Normal => badge.as_str().green(),
            };
            writeln!(out, "Confidence: {}", badge)?;
        }
        if let Some(gloss) = &r.gloss {
            writeln!(out, "Gloss: {}", gloss)?;
        }
        if let Some(unmatched) = &r.unmatched {
            writeln!(out, "{}", unmatched.as_str().dark_grey())?;
        }
    } else if !session.state().input.is_empty() {
        writeln!(out, "\nLast input: {}", session.state().input)?;
    }

    if !notice.is_empty() {
        writeln!(out, "\n{}", notice)?;
    }
    write!(out, "\n{}> ", mode.input_label())?;
    out.flush()
}

// File: src/persistence.rs
use crate::error::Result;
use crate::host::SessionState;
use bincode::Options;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Upper bound on a session file. A corrupt length prefix fails to decode
/// instead of allocating whatever it claims.
const STATE_SIZE_LIMIT: u64 = 1 << 20;

fn state_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(STATE_SIZE_LIMIT)
}

/// Writes the session state atomically: a temp file in the target directory
/// is persisted over `path` only after a complete write.
pub fn save_to_disk(state: &SessionState, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        state_options().serialize_into(&mut writer, state)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<SessionState> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SessionState = state_options().deserialize_from(reader)?;
    Ok(state)
}

/// A missing or unreadable state file starts a fresh session.
pub fn load_or_default(path: &Path) -> SessionState {
    match load_from_disk(path) {
        Ok(state) => state,
        Err(e) => {
            if path.exists() {
                tracing::warn!(path = %path.display(), error = %e, "discarding unreadable session state");
            }
            SessionState::default()
        }
    }
}

// File: src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session state encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    /// The dictionary document is missing a required shape.
    #[error("Malformed dictionary: {0}")]
    MalformedDictionary(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GlyphError>;

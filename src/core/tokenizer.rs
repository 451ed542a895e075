// src/core/tokenizer.rs
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not an ASCII word char, whitespace, or a CJK Unified Ideograph.
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_\s\x{4E00}-\x{9FFF}]").unwrap();
}

/// Lowercases `text` and splits it into word tokens. Punctuation and symbols
/// act as separators.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Token length in chars, as used for the significance threshold.
pub fn token_len(token: &str) -> usize {
    token.chars().count()
}

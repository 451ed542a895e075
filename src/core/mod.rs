pub mod canonical;
pub mod converter;
pub mod decoder;
pub mod dictionary;
pub mod engine;
pub mod index;
pub mod tokenizer;
pub mod trie;
pub mod types;

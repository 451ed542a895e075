// src/lib.rs

pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod persistence;

pub use crate::config::EngineConfig;
pub use crate::core::dictionary::Dictionary;
pub use crate::core::engine::GlyphEngine;
pub use crate::error::{GlyphError, Result};

//! Analyzer implementations that combine tokenizers and filters.

pub mod analyzer;
pub mod language;
pub mod pipeline;

//! Text analysis module for Wayfarer.
//!
//! This module turns raw utterances into normalized word tokens: split into
//! words, lowercase, lemmatize. The vocabulary is built with exactly the same
//! pipeline, so any change here invalidates previously exported vocabularies.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

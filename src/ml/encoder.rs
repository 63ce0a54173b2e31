//! Bag-of-words feature encoder.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::error::Result;

/// Converts utterances into binary presence vectors over a fixed vocabulary.
///
/// Coordinate `i` of the output is `1.0` when `vocabulary[i]` occurs among the
/// normalized terms of the utterance, otherwise `0.0`. Repeats collapse to a
/// single `1.0` and out-of-vocabulary terms are dropped silently.
pub struct BagOfWordsEncoder {
    /// Vocabulary in feature order.
    vocabulary: Vec<String>,
    /// Analyzer for tokenization; must match the one the vocabulary was built with.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for BagOfWordsEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BagOfWordsEncoder")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl BagOfWordsEncoder {
    /// Create an encoder over `vocabulary` using `analyzer` for normalization.
    pub fn new(vocabulary: Vec<String>, analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary,
            analyzer,
        }
    }

    /// Split, lowercase, and lemmatize `text` with the vocabulary's analyzer.
    pub fn tokenize_and_normalize(&self, text: &str) -> Result<Vec<String>> {
        self.analyzer.terms(text)
    }

    /// Encode `text` as a presence vector of length [`vocabulary_size`](Self::vocabulary_size).
    pub fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let terms: HashSet<String> = self.tokenize_and_normalize(text)?.into_iter().collect();

        Ok(self
            .vocabulary
            .iter()
            .map(|word| if terms.contains(word) { 1.0 } else { 0.0 })
            .collect())
    }

    /// Vocabulary words present in `text`, in vocabulary order.
    pub fn matched_terms(&self, text: &str) -> Result<Vec<&str>> {
        let terms: HashSet<String> = self.tokenize_and_normalize(text)?.into_iter().collect();

        Ok(self
            .vocabulary
            .iter()
            .filter(|word| terms.contains(*word))
            .map(String::as_str)
            .collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// The vocabulary in feature order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// The analyzer used for normalization.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }
}

//! Vocabulary and label set shared by the encoder and the classifier.
//!
//! The position of a word in [`ModelMetadata::words`] is the feature index it
//! sets, and the position of a tag in [`ModelMetadata::classes`] is the model
//! output it reads. Both orders are fixed when the model is built.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::error::{Result, WayfarerError};
use crate::ml::intents::IntentTable;
use crate::ml::{read_artifact, write_artifact};

/// The persisted metadata artifact: vocabulary plus intent labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Normalized word tokens, one per feature coordinate.
    pub words: Vec<String>,
    /// Intent tags, one per model output coordinate.
    pub classes: Vec<String>,
}

impl ModelMetadata {
    /// Create validated metadata.
    pub fn new(words: Vec<String>, classes: Vec<String>) -> Result<Self> {
        let metadata = ModelMetadata { words, classes };
        metadata.check().map_err(WayfarerError::invalid_argument)?;
        Ok(metadata)
    }

    /// Load the metadata artifact (JSON or bincode) and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let metadata: ModelMetadata = read_artifact(path)?;
        metadata
            .check()
            .map_err(|reason| WayfarerError::model_load(path.display().to_string(), reason))?;

        info!(
            "Loaded metadata from {}: {} words, {} classes",
            path.display(),
            metadata.vocabulary_size(),
            metadata.num_classes()
        );
        Ok(metadata)
    }

    /// Write the metadata artifact in the format implied by the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_artifact(self, path)
    }

    /// Number of vocabulary words (V).
    pub fn vocabulary_size(&self) -> usize {
        self.words.len()
    }

    /// Number of intent labels (C).
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Label at model output `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.words.is_empty() {
            return Err("vocabulary is empty".to_string());
        }
        if self.classes.is_empty() {
            return Err("label set is empty".to_string());
        }
        if let Some(duplicate) = first_duplicate(&self.words) {
            return Err(format!("duplicate vocabulary word '{duplicate}'"));
        }
        if let Some(duplicate) = first_duplicate(&self.classes) {
            return Err(format!("duplicate intent label '{duplicate}'"));
        }
        if self.words.iter().any(String::is_empty) {
            return Err("vocabulary contains an empty word".to_string());
        }
        if self.classes.iter().any(String::is_empty) {
            return Err("label set contains an empty tag".to_string());
        }
        Ok(())
    }
}

fn first_duplicate(items: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .find(|item| !seen.insert(item.as_str()))
        .map(String::as_str)
}

/// Derives [`ModelMetadata`] from the example patterns of an intent table.
///
/// Patterns are normalized with the same analyzer the encoder uses; the
/// distinct terms are sorted to form the vocabulary, and the distinct tags
/// are sorted to form the label set.
pub struct VocabularyBuilder {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for VocabularyBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyBuilder")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl VocabularyBuilder {
    /// Create a builder around the analyzer used at inference time.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        VocabularyBuilder { analyzer }
    }

    /// Build the vocabulary and label set from every pattern in `intents`.
    pub fn build(&self, intents: &IntentTable) -> Result<ModelMetadata> {
        let mut words = BTreeSet::new();
        let mut classes = BTreeSet::new();

        for record in intents.records() {
            classes.insert(record.tag.clone());
            for pattern in &record.patterns {
                words.extend(self.analyzer.terms(pattern)?);
            }
        }

        debug!(
            "Built vocabulary of {} words over {} classes",
            words.len(),
            classes.len()
        );

        ModelMetadata::new(words.into_iter().collect(), classes.into_iter().collect())
    }
}

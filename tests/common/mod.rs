#![allow(dead_code)]

use std::sync::Arc;

use wayfarer::analysis::analyzer::analyzer::Analyzer;
use wayfarer::analysis::analyzer::language::english::EnglishAnalyzer;
use wayfarer::error::Result;
use wayfarer::ml::classifier::{Activation, DenseLayer, DenseNetwork};
use wayfarer::ml::intents::{IntentRecord, IntentTable};
use wayfarer::ml::vocabulary::{ModelMetadata, VocabularyBuilder};

/// Logit added for each pattern word a class has seen.
const KEYWORD_WEIGHT: f32 = 4.0;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Four intents, so an all-zero input gives exactly 0.25 per class.
pub fn sample_intents() -> Result<IntentTable> {
    IntentTable::new(vec![
        IntentRecord::new(
            "greeting",
            strings(&["Hi", "Hello", "Good morning"]),
            strings(&["Hello! Where are you headed?", "Hi there! Planning a trip?"]),
        ),
        IntentRecord::new(
            "goodbye",
            strings(&["Bye", "See you later", "Goodbye"]),
            strings(&["Safe travels!", "Bon voyage!"]),
        ),
        IntentRecord::new(
            "thanks",
            strings(&["Thanks", "Thank you"]),
            strings(&["Happy to help!"]),
        ),
        IntentRecord::new(
            "visa_requirements",
            strings(&["Do I need a visa?", "Visa requirements"]),
            strings(&["Visa rules depend on your nationality. Where are you going?"]),
        ),
    ])
}

pub fn english() -> Result<Arc<EnglishAnalyzer>> {
    Ok(Arc::new(EnglishAnalyzer::new()?))
}

pub fn sample_metadata(intents: &IntentTable) -> Result<ModelMetadata> {
    VocabularyBuilder::new(english()?).build(intents)
}

/// A single softmax layer that scores each class by the pattern words it contains.
pub fn keyword_network(metadata: &ModelMetadata, intents: &IntentTable) -> Result<DenseNetwork> {
    let analyzer = EnglishAnalyzer::new()?;
    let mut weights = vec![vec![0.0; metadata.num_classes()]; metadata.vocabulary_size()];

    for (class, tag) in metadata.classes.iter().enumerate() {
        let Some(record) = intents.get(tag) else {
            continue;
        };
        for pattern in &record.patterns {
            for term in analyzer.terms(pattern)? {
                if let Some(word) = metadata.words.iter().position(|w| *w == term) {
                    weights[word][class] = KEYWORD_WEIGHT;
                }
            }
        }
    }

    let layer = DenseLayer::new(
        weights,
        vec![0.0; metadata.num_classes()],
        Activation::Softmax,
    )?;
    DenseNetwork::new(vec![layer])
}

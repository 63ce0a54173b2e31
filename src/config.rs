//! Configuration for the chatbot core.
//!
//! [`ChatbotConfig`] can be built in code, deserialized from a JSON file, or
//! assembled by the CLI from flags and `WAYFARER_*` environment variables.
//! Every field has a default, so a config file only needs the fields it
//! changes.
//!
//! # Examples
//!
//! ```
//! use wayfarer::config::{ChatbotConfig, EmptyInputPolicy};
//!
//! let config: ChatbotConfig = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(config.confidence_threshold, 0.25);
//! assert_eq!(config.empty_input, EmptyInputPolicy::Encode);
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use log::info;

use crate::analysis::analyzer::language::english::EnglishAnalyzer;
use crate::analysis::token_filter::lemma::wordnet::WordNetLemmatizer;
use crate::error::{Result, WayfarerError};
use crate::ml::decision::DEFAULT_CONFIDENCE_THRESHOLD;

/// Default reply when no intent clears the confidence threshold.
pub const DEFAULT_FALLBACK_RESPONSE: &str =
    "Sorry, I didn't quite understand that. Could you rephrase your travel question?";

/// How an empty or whitespace-only utterance is treated.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyInputPolicy {
    /// Encode it like any other utterance (an all-zero feature vector).
    #[default]
    Encode,
    /// Fail the request with `EmptyInput`.
    Reject,
}

/// Configuration for [`Chatbot`](crate::chatbot::Chatbot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    /// Classifier artifact (`.json`, `.bin`, or `.bincode`).
    pub model_path: PathBuf,
    /// Vocabulary and label set artifact (`.json`, `.bin`, or `.bincode`).
    pub metadata_path: PathBuf,
    /// Intent table file; the built-in travel table when `None`.
    pub intents_path: Option<PathBuf>,
    /// Lemma lexicon, one word per line; suffix heuristics alone when `None`.
    ///
    /// Must match the lexicon used when the vocabulary was built.
    pub lexicon_path: Option<PathBuf>,
    /// Probability a class must exceed to count as a match.
    pub confidence_threshold: f32,
    /// Reply used when no intent clears the threshold.
    pub fallback_response: String,
    /// Treatment of empty utterances.
    pub empty_input: EmptyInputPolicy,
    /// Seed for response selection; OS entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("nlp_model/travel_chatbot_model.json"),
            metadata_path: PathBuf::from("nlp_model/travel_chatbot_data.json"),
            intents_path: None,
            lexicon_path: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            fallback_response: DEFAULT_FALLBACK_RESPONSE.to_string(),
            empty_input: EmptyInputPolicy::default(),
            seed: None,
        }
    }
}

impl ChatbotConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ChatbotConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the English analysis pipeline, with the lexicon when one is set.
    pub fn analyzer(&self) -> Result<EnglishAnalyzer> {
        match &self.lexicon_path {
            Some(path) => {
                let lemmatizer = WordNetLemmatizer::from_lexicon_file(path)?;
                info!(
                    "Loaded {} lemmas from {}",
                    lemmatizer.lexicon_size().unwrap_or_default(),
                    path.display()
                );
                EnglishAnalyzer::with_lemmatizer(lemmatizer)
            }
            None => EnglishAnalyzer::new(),
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.confidence_threshold.is_finite()
            || !(0.0..1.0).contains(&self.confidence_threshold)
        {
            return Err(WayfarerError::invalid_config(format!(
                "confidence_threshold must be in [0, 1), got {}",
                self.confidence_threshold
            )));
        }
        if self.fallback_response.trim().is_empty() {
            return Err(WayfarerError::invalid_config(
                "fallback_response must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChatbotConfig::default();
        assert_eq!(config.confidence_threshold, 0.25);
        assert_eq!(config.fallback_response, DEFAULT_FALLBACK_RESPONSE);
        assert_eq!(config.empty_input, EmptyInputPolicy::Encode);
        assert!(config.intents_path.is_none());
        assert!(config.lexicon_path.is_none());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ChatbotConfig = serde_json::from_str(
            r#"{"model_path": "m.bin", "empty_input": "reject", "confidence_threshold": 0.5}"#,
        )
        .unwrap();

        assert_eq!(config.model_path, PathBuf::from("m.bin"));
        assert_eq!(config.empty_input, EmptyInputPolicy::Reject);
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(
            config.metadata_path,
            PathBuf::from("nlp_model/travel_chatbot_data.json")
        );
    }

    #[test]
    fn test_validate_threshold() {
        for threshold in [-0.1, 1.0, 1.5, f32::NAN, f32::INFINITY] {
            let config = ChatbotConfig {
                confidence_threshold: threshold,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(WayfarerError::InvalidConfig(_))),
                "threshold {threshold} accepted"
            );
        }

        let config = ChatbotConfig {
            confidence_threshold: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_fallback() {
        let config = ChatbotConfig {
            fallback_response: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_analyzer_uses_lexicon() {
        use crate::analysis::analyzer::analyzer::Analyzer;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.txt");
        std::fs::write(&path, "travel\nbook\n").unwrap();

        let plain = ChatbotConfig::default().analyzer().unwrap();
        assert_eq!(plain.terms("Traveling").unwrap(), vec!["traveling"]);

        let config = ChatbotConfig {
            lexicon_path: Some(path),
            ..Default::default()
        };
        let analyzer = config.analyzer().unwrap();
        assert_eq!(analyzer.terms("Traveling").unwrap(), vec!["travel"]);

        let missing = ChatbotConfig {
            lexicon_path: Some(dir.path().join("missing.txt")),
            ..Default::default()
        };
        assert!(missing.analyzer().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wayfarer.json");

        std::fs::write(&path, r#"{"seed": 3, "fallback_response": "Pardon?"}"#).unwrap();
        let config = ChatbotConfig::from_file(&path).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.fallback_response, "Pardon?");

        std::fs::write(&path, r#"{"confidence_threshold": 2.0}"#).unwrap();
        assert!(ChatbotConfig::from_file(&path).is_err());
    }
}

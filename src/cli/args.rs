//! Command line argument parsing for the wayfarer CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ChatbotConfig, EmptyInputPolicy};
use crate::error::Result;

/// Wayfarer - an intent-classifying travel chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "wayfarer")]
#[command(about = "An intent-classifying travel chatbot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WayfarerArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(long, value_name = "FILE", env = "WAYFARER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Classifier artifact
    #[arg(long, value_name = "FILE", env = "WAYFARER_MODEL", global = true)]
    pub model: Option<PathBuf>,

    /// Vocabulary and label set artifact
    #[arg(long, value_name = "FILE", env = "WAYFARER_METADATA", global = true)]
    pub metadata: Option<PathBuf>,

    /// Intent table (defaults to the built-in travel intents)
    #[arg(long, value_name = "FILE", env = "WAYFARER_INTENTS", global = true)]
    pub intents: Option<PathBuf>,

    /// Lemma lexicon, one word per line
    #[arg(long, value_name = "FILE", env = "WAYFARER_LEXICON", global = true)]
    pub lexicon: Option<PathBuf>,

    /// Seed for response selection
    #[arg(long, env = "WAYFARER_SEED", global = true)]
    pub seed: Option<u64>,

    /// Confidence threshold a prediction must exceed
    #[arg(long, env = "WAYFARER_THRESHOLD", global = true)]
    pub threshold: Option<f32>,

    /// Treatment of empty utterances
    #[arg(long, value_name = "POLICY", global = true)]
    pub empty_input: Option<EmptyInputPolicy>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WayfarerArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the chatbot configuration: config file (or defaults), then flags.
    pub fn chatbot_config(&self) -> Result<ChatbotConfig> {
        let mut config = match &self.config {
            Some(path) => ChatbotConfig::from_file(path)?,
            None => ChatbotConfig::default(),
        };

        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(metadata) = &self.metadata {
            config.metadata_path = metadata.clone();
        }
        if let Some(intents) = &self.intents {
            config.intents_path = Some(intents.clone());
        }
        if let Some(lexicon) = &self.lexicon {
            config.lexicon_path = Some(lexicon.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(threshold) = self.threshold {
            config.confidence_threshold = threshold;
        }
        if let Some(policy) = self.empty_input {
            config.empty_input = policy;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer a single utterance
    Ask(AskArgs),

    /// Show ranked intent predictions for an utterance
    Classify(ClassifyArgs),

    /// Interactive session reading utterances from stdin
    Chat,

    /// Derive the vocabulary and label set from an intent table
    #[command(name = "build-vocabulary")]
    BuildVocabulary(BuildVocabularyArgs),

    /// List the intents in the intent table
    Intents,
}

/// Arguments for answering an utterance
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The user's message
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,
}

/// Arguments for classifying an utterance
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// The user's message
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,
}

/// Arguments for building the vocabulary artifact
#[derive(Parser, Debug, Clone)]
pub struct BuildVocabularyArgs {
    /// Output path (`.json`, `.bin`, or `.bincode`)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

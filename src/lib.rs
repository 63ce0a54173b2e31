//! # Wayfarer
//!
//! The core of an intent-classifying travel chatbot.
//!
//! An utterance is tokenized, lowercased, and lemmatized, encoded as a
//! bag-of-words presence vector over a fixed vocabulary, and scored by a
//! pretrained dense classifier. The most probable intent above a confidence
//! threshold selects one of that intent's canned responses at random.
//!
//! ## Features
//!
//! - Pluggable text analysis pipeline (tokenizer, filters, lemmatizer)
//! - Dense feed-forward inference over JSON or bincode artifacts
//! - Thread-safe [`Chatbot`](chatbot::Chatbot) with an injectable random source
//! - Vocabulary derivation from an intent table
//!
//! ## Example
//!
//! ```no_run
//! use wayfarer::chatbot::Chatbot;
//! use wayfarer::config::ChatbotConfig;
//!
//! let chatbot = Chatbot::from_config(&ChatbotConfig::default())?;
//! println!("{}", chatbot.respond("Do I need a visa?")?);
//! # Ok::<(), wayfarer::error::WayfarerError>(())
//! ```

pub mod analysis;
pub mod chatbot;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

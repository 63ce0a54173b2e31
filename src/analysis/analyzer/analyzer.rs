//! Core analyzer trait definition.
//!
//! An [`Analyzer`] is the complete normalization pipeline that turns an
//! utterance into the tokens the bag-of-words encoder looks up:
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Vocabulary lookup
//!             ↓
//!         Tokenizer
//!             ↓
//!         Lowercase
//!             ↓
//!         Lemmatize
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](super::pipeline::PipelineAnalyzer) - Custom tokenizer + filter chains
//! - [`EnglishAnalyzer`](super::language::english::EnglishAnalyzer) - The default intent pipeline
//!
//! # Examples
//!
//! ```
//! use wayfarer::analysis::analyzer::analyzer::Analyzer;
//! use wayfarer::analysis::analyzer::language::english::EnglishAnalyzer;
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Cheap Flights").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "cheap");
//! assert_eq!(tokens[1].text, "flight");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// every request the chatbot serves.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the text and keep only the token strings.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

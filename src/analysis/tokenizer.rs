//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first stage of the analysis pipeline: they split raw
//! utterances into word tokens before any normalization happens.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Regex-based tokenization with a word pattern
//!   that also separates English clitics (`"that's"` → `"that"`, `"'s"`)
//!
//! # Examples
//!
//! ```
//! use wayfarer::analysis::tokenizer::Tokenizer;
//! use wayfarer::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod regex;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can serve concurrent
/// requests.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

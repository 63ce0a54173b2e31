//! Lemmatizing token filter and lemmatizer implementations.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

pub mod wordnet;

pub use wordnet::WordNetLemmatizer;

/// Trait for lemmatization algorithms.
///
/// Unlike a stemmer, a lemmatizer maps a word onto a dictionary form
/// (`"countries"` → `"country"`, not `"countri"`).
pub trait Lemmatizer: Send + Sync {
    /// Reduce a lowercase word to its lemma.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Filter that replaces every token with its lemma.
pub struct LemmatizeFilter {
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmatizeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmatizeFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmatizeFilter {
    /// Create a new lemmatize filter with the rule-based WordNet lemmatizer.
    pub fn new() -> Self {
        LemmatizeFilter {
            lemmatizer: Box::new(WordNetLemmatizer::new()),
        }
    }

    /// Create a lemmatize filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        LemmatizeFilter { lemmatizer }
    }
}

impl Default for LemmatizeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmatizeFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let lemma = self.lemmatizer.lemmatize(&token.text);
                token.with_text(lemma)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemmatize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lemmatize_filter() {
        let filter = LemmatizeFilter::new();
        let tokens = vec![
            Token::new("flights", 0),
            Token::new("countries", 1),
            Token::new("visa", 2),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "flight");
        assert_eq!(result[1].text, "country");
        assert_eq!(result[2].text, "visa");
    }

    #[test]
    fn test_custom_lemmatizer() {
        struct Upper;

        impl Lemmatizer for Upper {
            fn lemmatize(&self, word: &str) -> String {
                word.to_uppercase()
            }

            fn name(&self) -> &'static str {
                "upper"
            }
        }

        let filter = LemmatizeFilter::with_lemmatizer(Box::new(Upper));
        let tokens = vec![Token::new("hotel", 0)];
        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result[0].text, "HOTEL");
        let debug = format!("{filter:?}");
        assert_eq!(debug, "LemmatizeFilter { lemmatizer: \"upper\" }");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LemmatizeFilter::new().name(), "lemmatize");
    }
}

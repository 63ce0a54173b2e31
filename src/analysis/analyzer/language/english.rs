use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::{LemmatizeFilter, WordNetLemmatizer};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// The analyzer used both to build the vocabulary and to encode utterances.
///
/// Stop words are kept: short utterances such as "I'm done" carry their
/// intent in exactly those words.
pub struct EnglishAnalyzer {
    inner: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_lemmatizer(WordNetLemmatizer::new())
    }

    /// Build the pipeline around a specific lemmatizer, e.g. one with a lexicon.
    pub fn with_lemmatizer(lemmatizer: WordNetLemmatizer) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let lemma = LemmatizeFilter::with_lemmatizer(Box::new(lemmatizer));
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(lemma))
            .with_name("english");

        Ok(Self { inner: analyzer })
    }
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new().expect("English analyzer should be creatable with default settings")
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

impl Debug for EnglishAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_english_analyzer() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        let tokens: Vec<Token> = analyzer
            .analyze("Do I need Visas for these Countries?")
            .unwrap()
            .collect();

        let terms: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            terms,
            vec!["do", "i", "need", "visa", "for", "these", "country"]
        );
    }

    #[test]
    fn test_single_greeting() {
        let analyzer = EnglishAnalyzer::new().unwrap();
        assert_eq!(analyzer.terms("Hello").unwrap(), vec!["hello"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let analyzer = EnglishAnalyzer::new().unwrap();
        assert!(analyzer.terms("").unwrap().is_empty());
        assert!(analyzer.terms("?! ...").unwrap().is_empty());
    }

    #[test]
    fn test_with_lexicon() {
        let lemmatizer = WordNetLemmatizer::with_lexicon(["travel"]);
        let analyzer = EnglishAnalyzer::with_lemmatizer(lemmatizer).unwrap();
        assert_eq!(
            analyzer.terms("Traveling alone").unwrap(),
            vec!["travel", "alone"]
        );
    }

    #[test]
    fn test_english_analyzer_name() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        assert_eq!(analyzer.name(), "english");
    }
}

//! Language-specific analyzers.
//!
//! # Available Languages
//!
//! - [`english`] - Regex word tokenization, lowercasing, and WordNet-style lemmatization
//!
//! # Examples
//!
//! ```
//! use wayfarer::analysis::analyzer::analyzer::Analyzer;
//! use wayfarer::analysis::analyzer::language::english::EnglishAnalyzer;
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! let terms = analyzer.terms("Hello!").unwrap();
//!
//! assert_eq!(terms, vec!["hello"]);
//! ```

pub mod english;

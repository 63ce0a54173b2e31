//! WordNet-style rule-based lemmatizer.
//!
//! This follows the detachment rules of WordNet's `morphy`: a table of
//! irregular forms is consulted first, then suffix rules produce candidate
//! lemmas.
//!
//! The lemmatizer runs in one of two modes:
//!
//! - **Without a lexicon** (the default), only noun rules apply and the first
//!   matching rule wins, guarded against words that merely end in `s`
//!   (`"glass"`, `"bus"`, `"visa"`).
//! - **With a lexicon**, noun and verb rules both generate candidates and only
//!   candidates present in the lexicon are accepted; the shortest wins.
//!   Words already in the lexicon are returned unchanged.
//!
//! # Examples
//!
//! ```
//! use wayfarer::analysis::token_filter::lemma::Lemmatizer;
//! use wayfarer::analysis::token_filter::lemma::wordnet::WordNetLemmatizer;
//!
//! let lemmatizer = WordNetLemmatizer::new();
//! assert_eq!(lemmatizer.lemmatize("countries"), "country");
//! assert_eq!(lemmatizer.lemmatize("beaches"), "beach");
//! assert_eq!(lemmatizer.lemmatize("children"), "child");
//!
//! let lemmatizer = WordNetLemmatizer::with_lexicon(["travel", "tip"]);
//! assert_eq!(lemmatizer.lemmatize("traveling"), "travel");
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;

use crate::analysis::token_filter::lemma::Lemmatizer;
use crate::error::Result;

/// Noun detachment rules as `(suffix, replacement)`.
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Verb detachment rules as `(suffix, replacement)`.
const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

/// Irregular plural forms and words the suffix rules would mangle.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("data", "datum"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("always", "always"),
    ("perhaps", "perhaps"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
    ("christmas", "christmas"),
    ("lens", "lens"),
];

/// Suffixes that look plural but usually are not.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "'s"];

/// Rule-based lemmatizer modelled on WordNet's morphological processor.
#[derive(Debug, Clone)]
pub struct WordNetLemmatizer {
    exceptions: HashMap<String, String>,
    lexicon: Option<HashSet<String>>,
}

impl WordNetLemmatizer {
    /// Create a lemmatizer that applies noun rules without a lexicon.
    pub fn new() -> Self {
        WordNetLemmatizer {
            exceptions: EXCEPTIONS
                .iter()
                .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
                .collect(),
            lexicon: None,
        }
    }

    /// Create a lemmatizer that only accepts lemmas present in `lexicon`.
    pub fn with_lexicon<I, S>(lexicon: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lemmatizer = Self::new();
        lemmatizer.lexicon = Some(lexicon.into_iter().map(Into::into).collect());
        lemmatizer
    }

    /// Load a lexicon file with one lemma per line.
    ///
    /// Lemmas are lowercased. Blank lines and lines starting with `#` are skipped.
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon {}", path.display()))?;

        let lemmas = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase);

        Ok(Self::with_lexicon(lemmas))
    }

    /// Number of lemmas in the lexicon, if one is set.
    pub fn lexicon_size(&self) -> Option<usize> {
        self.lexicon.as_ref().map(HashSet::len)
    }

    /// Register an extra irregular form.
    pub fn add_exception<S: Into<String>>(&mut self, form: S, lemma: S) {
        self.exceptions.insert(form.into(), lemma.into());
    }

    /// Whether a lexicon constrains the produced lemmas.
    pub fn has_lexicon(&self) -> bool {
        self.lexicon.is_some()
    }

    fn lemmatize_with_lexicon(word: &str, lexicon: &HashSet<String>) -> String {
        if lexicon.contains(word) {
            return word.to_string();
        }

        let mut best: Option<String> = None;
        for (suffix, replacement) in NOUN_RULES.iter().chain(VERB_RULES.iter()) {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let candidate = format!("{stem}{replacement}");
            if !lexicon.contains(&candidate) {
                continue;
            }
            // Shortest candidate wins; the first one found wins ties.
            if best.as_ref().is_none_or(|b| candidate.len() < b.len()) {
                best = Some(candidate);
            }
        }

        best.unwrap_or_else(|| word.to_string())
    }

    fn lemmatize_by_rules(word: &str) -> String {
        if word.chars().count() <= 3 || SINGULAR_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies")
            && stem.len() >= 2
        {
            return format!("{stem}y");
        }

        for suffix in ["sses", "ches", "shes", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }

        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}

impl Default for WordNetLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for WordNetLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }

        match &self.lexicon {
            Some(lexicon) => Self::lemmatize_with_lexicon(word, lexicon),
            None => Self::lemmatize_by_rules(word),
        }
    }

    fn name(&self) -> &'static str {
        "wordnet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = WordNetLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("flights"), "flight");
        assert_eq!(lemmatizer.lemmatize("hotels"), "hotel");
        assert_eq!(lemmatizer.lemmatize("countries"), "country");
        assert_eq!(lemmatizer.lemmatize("beaches"), "beach");
        assert_eq!(lemmatizer.lemmatize("dishes"), "dish");
        assert_eq!(lemmatizer.lemmatize("taxes"), "tax");
        assert_eq!(lemmatizer.lemmatize("passes"), "pass");
    }

    #[test]
    fn test_words_left_alone() {
        let lemmatizer = WordNetLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("visa"), "visa");
        assert_eq!(lemmatizer.lemmatize("glass"), "glass");
        assert_eq!(lemmatizer.lemmatize("bus"), "bus");
        assert_eq!(lemmatizer.lemmatize("is"), "is");
        assert_eq!(lemmatizer.lemmatize("hello"), "hello");
        assert_eq!(lemmatizer.lemmatize("'s"), "'s");
        assert_eq!(lemmatizer.lemmatize(""), "");
    }

    #[test]
    fn test_exceptions() {
        let mut lemmatizer = WordNetLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("women"), "woman");
        assert_eq!(lemmatizer.lemmatize("leaves"), "leaf");
        assert_eq!(lemmatizer.lemmatize("always"), "always");

        lemmatizer.add_exception("oxen", "ox");
        assert_eq!(lemmatizer.lemmatize("oxen"), "ox");
    }

    #[test]
    fn test_lexicon_mode() {
        let lemmatizer = WordNetLemmatizer::with_lexicon(["travel", "pack", "city", "bus"]);
        assert!(lemmatizer.has_lexicon());

        assert_eq!(lemmatizer.lemmatize("traveling"), "travel");
        assert_eq!(lemmatizer.lemmatize("packed"), "pack");
        assert_eq!(lemmatizer.lemmatize("cities"), "city");
        assert_eq!(lemmatizer.lemmatize("bus"), "bus");
        // Candidates outside the lexicon are rejected.
        assert_eq!(lemmatizer.lemmatize("flights"), "flights");
    }

    #[test]
    fn test_short_ies_words_drop_only_s() {
        let lemmatizer = WordNetLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("ties"), "tie");
        assert_eq!(lemmatizer.lemmatize("pies"), "pie");
        assert_eq!(lemmatizer.lemmatize("cities"), "city");
    }

    #[test]
    fn test_from_lexicon_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.txt");
        let content = "# travel lemmas\nTravel\n\n  book \ncity\n";
        std::fs::write(&path, content).unwrap();

        let lemmatizer = WordNetLemmatizer::from_lexicon_file(&path).unwrap();
        assert_eq!(lemmatizer.lexicon_size(), Some(3));
        assert_eq!(lemmatizer.lemmatize("traveling"), "travel");
        assert_eq!(lemmatizer.lemmatize("booked"), "book");
        assert_eq!(lemmatizer.lemmatize("cities"), "city");

        let missing = dir.path().join("missing.txt");
        assert!(WordNetLemmatizer::from_lexicon_file(&missing).is_err());
    }

    #[test]
    fn test_lemmatizer_name() {
        assert_eq!(WordNetLemmatizer::new().name(), "wordnet");
        assert!(!WordNetLemmatizer::default().has_lexicon());
    }
}

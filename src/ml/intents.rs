//! The static intent table: tag → example patterns and canned responses.
//!
//! The table is configuration, built once at startup and only ever read
//! afterwards. Patterns matter only when deriving a vocabulary; at request
//! time only the responses are used.
//!
//! The file format is the `{"intents": [{"tag", "patterns", "responses"}]}`
//! JSON document the travel assistant has always used. A copy of the travel
//! table ships with the crate and is available through [`IntentTable::travel`].

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WayfarerError};

const TRAVEL_INTENTS: &str = include_str!("../../resources/intents.json");

/// A single intent: its tag, training patterns, and candidate responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
}

impl IntentRecord {
    pub fn new<S: Into<String>>(tag: S, patterns: Vec<String>, responses: Vec<String>) -> Self {
        IntentRecord {
            tag: tag.into(),
            patterns,
            responses,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct IntentFile {
    intents: Vec<IntentRecord>,
}

/// Read-only lookup from intent tag to its record.
#[derive(Debug, Clone)]
pub struct IntentTable {
    records: Vec<IntentRecord>,
    by_tag: HashMap<String, usize>,
}

impl IntentTable {
    /// Build a table, rejecting empty or duplicate tags and records without responses.
    pub fn new(records: Vec<IntentRecord>) -> Result<Self> {
        let mut by_tag = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if record.tag.is_empty() {
                return Err(WayfarerError::invalid_config(format!(
                    "intent record {index} has an empty tag"
                )));
            }
            if record.responses.is_empty() {
                return Err(WayfarerError::invalid_config(format!(
                    "intent '{}' has no responses",
                    record.tag
                )));
            }
            if by_tag.insert(record.tag.clone(), index).is_some() {
                return Err(WayfarerError::invalid_config(format!(
                    "intent '{}' is defined more than once",
                    record.tag
                )));
            }
        }

        Ok(IntentTable { records, by_tag })
    }

    /// Parse a table from its JSON document form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: IntentFile = serde_json::from_str(json)?;
        Self::new(file.intents)
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read intent table {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// The built-in travel assistant table.
    pub fn travel() -> Result<Self> {
        Self::from_json_str(TRAVEL_INTENTS)
    }

    /// Serialize the table back to its JSON document form.
    pub fn to_json_string(&self) -> Result<String> {
        let file = IntentFile {
            intents: self.records.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Look up the record for `tag`.
    pub fn get(&self, tag: &str) -> Option<&IntentRecord> {
        self.by_tag.get(tag).map(|&index| &self.records[index])
    }

    /// Whether a record exists for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// All records in file order.
    pub fn records(&self) -> &[IntentRecord] {
        &self.records
    }

    /// All tags in file order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.tag.as_str())
    }

    /// Number of intent records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pick one of `tag`'s responses uniformly at random.
    ///
    /// Fails with `UnknownIntent` when the table has no record for `tag`.
    pub fn choose_response<R: Rng + ?Sized>(&self, tag: &str, rng: &mut R) -> Result<&str> {
        let record = self
            .get(tag)
            .ok_or_else(|| WayfarerError::unknown_intent(tag))?;

        let index = rng.random_range(0..record.responses.len());
        Ok(record.responses[index].as_str())
    }
}

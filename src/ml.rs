//! Intent classification for the Wayfarer chatbot.
//!
//! The pieces line up with the request pipeline:
//!
//! ```text
//! utterance ─ encoder ─▶ feature vector ─ classifier ─▶ probabilities
//!                                                        │
//!               response ◀─ intents ◀─ tag ◀─ decision ◀─┘
//! ```
//!
//! - [`vocabulary`] - Vocabulary and label set persisted next to the model
//! - [`encoder`] - Bag-of-words presence vectors over the vocabulary
//! - [`classifier`] - The pre-trained scoring model behind [`classifier::IntentModel`]
//! - [`decision`] - Thresholding, ranking, and intent selection
//! - [`intents`] - The static tag → responses table
//!
//! Persisted artifacts are read and written through [`ArtifactFormat`], which
//! picks JSON or bincode from the file extension.

pub mod classifier;
pub mod decision;
pub mod encoder;
pub mod intents;
pub mod vocabulary;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, WayfarerError};

/// On-disk encoding of a persisted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Human-readable JSON (`.json`).
    Json,
    /// Compact bincode (`.bin`, `.bincode`).
    Bincode,
}

impl ArtifactFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(ArtifactFormat::Json),
            Some("bin") | Some("bincode") => Ok(ArtifactFormat::Bincode),
            other => Err(WayfarerError::model_load(
                path.display().to_string(),
                format!(
                    "unsupported artifact extension {:?}, expected .json, .bin or .bincode",
                    other.unwrap_or("")
                ),
            )),
        }
    }
}

/// Read and decode an artifact, mapping every failure to `ModelLoad`.
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = ArtifactFormat::from_path(path)?;
    let display = path.display().to_string();
    let bytes = std::fs::read(path)
        .map_err(|e| WayfarerError::model_load(display.clone(), e.to_string()))?;

    match format {
        ArtifactFormat::Json => serde_json::from_slice(&bytes)
            .map_err(|e| WayfarerError::model_load(display, e.to_string())),
        ArtifactFormat::Bincode => bincode::deserialize(&bytes)
            .map_err(|e| WayfarerError::model_load(display, e.to_string())),
    }
}

/// Encode an artifact in the format implied by `path` and write it out.
pub(crate) fn write_artifact<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let bytes = match ArtifactFormat::from_path(path)? {
        ArtifactFormat::Json => serde_json::to_vec_pretty(value)?,
        ArtifactFormat::Bincode => bincode::serialize(value)?,
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

//! Error types for the Wayfarer library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`WayfarerError`] enum. Most variants are ordinary failures (I/O, bad
//! artifacts, bad configuration). Two of them describe outcomes of the
//! decision policy itself:
//!
//! - [`WayfarerError::NoConfidentIntent`] is expected and recoverable. No
//!   intent cleared the confidence threshold, and the caller is expected to
//!   answer with a fallback message.
//! - [`WayfarerError::UnknownIntent`] means the classifier's labels and the
//!   intent table have drifted apart. It fails the current request only.
//!
//! # Examples
//!
//! ```
//! use wayfarer::error::{Result, WayfarerError};
//!
//! fn lookup(tag: &str) -> Result<()> {
//!     Err(WayfarerError::unknown_intent(tag))
//! }
//!
//! match lookup("surfing") {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Wayfarer operations.
#[derive(Error, Debug)]
pub enum WayfarerError {
    /// I/O errors (artifact files, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary serialization/deserialization errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The utterance was empty or whitespace-only and the policy rejects it.
    #[error("Empty input: the utterance contains no text")]
    EmptyInput,

    /// No intent scored above the confidence threshold.
    #[error("No confident intent: every class scored at or below the threshold")]
    NoConfidentIntent,

    /// A predicted tag has no record in the intent table.
    #[error("Unknown intent: no intent record is registered for tag '{tag}'")]
    UnknownIntent { tag: String },

    /// A persisted artifact is missing, malformed, or inconsistent.
    #[error("Model loading failed: {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    /// A vector does not have the length the model expects.
    #[error("Shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with WayfarerError.
pub type Result<T> = std::result::Result<T, WayfarerError>;

impl WayfarerError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        WayfarerError::Analysis(msg.into())
    }

    /// Create a new unknown intent error.
    pub fn unknown_intent<S: Into<String>>(tag: S) -> Self {
        WayfarerError::UnknownIntent { tag: tag.into() }
    }

    /// Create a new model loading error for the artifact at `path`.
    pub fn model_load<P: Into<String>, S: Into<String>>(path: P, reason: S) -> Self {
        WayfarerError::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new shape mismatch error.
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        WayfarerError::ShapeMismatch { expected, actual }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        WayfarerError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WayfarerError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WayfarerError::Other(msg.into())
    }

    /// Whether this error is the recoverable "nothing cleared the threshold" outcome.
    pub fn is_no_confident_intent(&self) -> bool {
        matches!(self, WayfarerError::NoConfidentIntent)
    }
}

//! Decision policy applied to raw model scores.
//!
//! Scores are paired with their labels, anything at or below the confidence
//! threshold is discarded, and the survivors are ranked highest first. The
//! top survivor is the predicted intent; an empty ranking means no intent was
//! recognized with enough confidence.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WayfarerError};

/// Minimum probability a class must exceed to be considered a match.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// One surviving (intent, probability) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    /// Intent tag.
    pub intent: String,
    /// Model score for the tag.
    pub probability: f32,
}

/// Pair scores with labels, drop those `<= threshold`, and sort descending.
///
/// The sort is stable, so exact ties keep label order. NaN scores never pass
/// the threshold. Fails with `ShapeMismatch` when the score vector and the
/// label set differ in length.
pub fn rank(
    probabilities: &[f32],
    labels: &[String],
    threshold: f32,
) -> Result<Vec<IntentPrediction>> {
    if probabilities.len() != labels.len() {
        return Err(WayfarerError::shape_mismatch(
            labels.len(),
            probabilities.len(),
        ));
    }

    let mut ranked: Vec<IntentPrediction> = probabilities
        .iter()
        .zip(labels)
        .filter(|(probability, _)| **probability > threshold)
        .map(|(&probability, label)| IntentPrediction {
            intent: label.clone(),
            probability,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });

    Ok(ranked)
}

/// The highest-ranked prediction, or `None` when nothing cleared the threshold.
pub fn select_intent(ranked: &[IntentPrediction]) -> Option<&IntentPrediction> {
    ranked.first()
}

//! The request pipeline: utterance in, canned response out.
//!
//! A [`Chatbot`] owns everything loaded at startup (vocabulary, labels,
//! classifier, intent table) and never mutates it, so one instance can be
//! shared behind an `Arc` by any number of request handlers. The random
//! source used to pick a response is the only mutable part and sits behind a
//! mutex.
//!
//! ```text
//! respond(utterance)
//!   └─ classify: tokenize → encode → predict → rank
//!   └─ select_intent ── None ──▶ fallback response
//!        └─ Some(tag) ─▶ choose_response(tag) ─▶ response
//! ```

use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{ChatbotConfig, EmptyInputPolicy};
use crate::error::{Result, WayfarerError};
use crate::ml::classifier::{DenseNetwork, IntentModel};
use crate::ml::decision::{IntentPrediction, rank, select_intent};
use crate::ml::encoder::BagOfWordsEncoder;
use crate::ml::intents::IntentTable;
use crate::ml::vocabulary::ModelMetadata;

/// Outcome of a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reply {
    /// An intent cleared the threshold and one of its responses was chosen.
    Matched {
        intent: String,
        probability: f32,
        response: String,
    },
    /// No intent cleared the threshold.
    Fallback { response: String },
}

impl Reply {
    /// The text to show the user.
    pub fn response(&self) -> &str {
        match self {
            Reply::Matched { response, .. } | Reply::Fallback { response } => response,
        }
    }

    /// The recognized intent, if any.
    pub fn intent(&self) -> Option<&str> {
        match self {
            Reply::Matched { intent, .. } => Some(intent),
            Reply::Fallback { .. } => None,
        }
    }

    /// Consume the reply, keeping only the response text.
    pub fn into_response(self) -> String {
        match self {
            Reply::Matched { response, .. } | Reply::Fallback { response } => response,
        }
    }
}

/// Intent-classifying chatbot.
pub struct Chatbot {
    encoder: BagOfWordsEncoder,
    model: Arc<dyn IntentModel>,
    labels: Vec<String>,
    intents: Arc<IntentTable>,
    threshold: f32,
    fallback_response: String,
    empty_input: EmptyInputPolicy,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("encoder", &self.encoder)
            .field("model", &self.model.name())
            .field("labels", &self.labels.len())
            .field("intents", &self.intents.len())
            .field("threshold", &self.threshold)
            .field("empty_input", &self.empty_input)
            .finish()
    }
}

impl Chatbot {
    /// Assemble a chatbot from already-loaded parts.
    ///
    /// The model must accept `encoder.vocabulary_size()` features and return
    /// one score per label. Labels missing from `intents` are only logged
    /// here; a request that predicts one fails with `UnknownIntent`.
    pub fn new(
        encoder: BagOfWordsEncoder,
        model: Arc<dyn IntentModel>,
        labels: Vec<String>,
        intents: Arc<IntentTable>,
        config: &ChatbotConfig,
    ) -> Result<Self> {
        config.validate()?;

        if model.input_size() != encoder.vocabulary_size() {
            return Err(WayfarerError::shape_mismatch(
                encoder.vocabulary_size(),
                model.input_size(),
            ));
        }
        if model.output_size() != labels.len() {
            return Err(WayfarerError::shape_mismatch(
                labels.len(),
                model.output_size(),
            ));
        }

        let rng: Box<dyn RngCore + Send> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_os_rng()),
        };

        let chatbot = Chatbot {
            encoder,
            model,
            labels,
            intents,
            threshold: config.confidence_threshold,
            fallback_response: config.fallback_response.clone(),
            empty_input: config.empty_input,
            rng: Mutex::new(rng),
        };

        let missing = chatbot.labels_without_intents();
        if !missing.is_empty() {
            warn!(
                "{} classifier labels have no intent record: {}",
                missing.len(),
                missing.join(", ")
            );
        }

        Ok(chatbot)
    }

    /// Load the artifacts and intent table named by `config`.
    ///
    /// Any missing, malformed, or mutually inconsistent artifact fails with
    /// `ModelLoad`; no partially initialized chatbot is ever returned.
    pub fn from_config(config: &ChatbotConfig) -> Result<Self> {
        config.validate()?;

        let metadata = ModelMetadata::load(&config.metadata_path)?;
        let network = DenseNetwork::load(&config.model_path)?;
        check_artifacts_agree(&network, &metadata, &config.model_path)?;

        let intents = match &config.intents_path {
            Some(path) => IntentTable::from_file(path)?,
            None => IntentTable::travel()?,
        };
        info!("Loaded {} intents", intents.len());

        let analyzer = Arc::new(config.analyzer()?);
        let encoder = BagOfWordsEncoder::new(metadata.words, analyzer);

        Self::new(
            encoder,
            Arc::new(network),
            metadata.classes,
            Arc::new(intents),
            config,
        )
    }

    /// Replace the random source used to pick responses.
    pub fn with_rng<R: RngCore + Send + 'static>(self, rng: R) -> Self {
        *self.rng.lock() = Box::new(rng);
        self
    }

    /// Run the classifier and return every intent above the threshold, best first.
    pub fn classify(&self, utterance: &str) -> Result<Vec<IntentPrediction>> {
        if utterance.trim().is_empty() && self.empty_input == EmptyInputPolicy::Reject {
            return Err(WayfarerError::EmptyInput);
        }

        let features = self.encoder.encode(utterance)?;
        debug!(
            "Encoded {:?} with {} active features",
            utterance,
            features.iter().filter(|f| **f > 0.0).count()
        );

        let probabilities = self.model.predict(&features)?;
        let ranked = rank(&probabilities, &self.labels, self.threshold)?;
        debug!("Ranked predictions: {ranked:?}");

        Ok(ranked)
    }

    /// Like [`reply`](Self::reply), but NO_INTENT is returned as `NoConfidentIntent`.
    pub fn reply_strict(&self, utterance: &str) -> Result<Reply> {
        let ranked = self.classify(utterance)?;
        let prediction = select_intent(&ranked).ok_or(WayfarerError::NoConfidentIntent)?;

        let response = {
            let mut rng = self.rng.lock();
            self.intents
                .choose_response(&prediction.intent, &mut **rng)?
                .to_string()
        };

        Ok(Reply::Matched {
            intent: prediction.intent.clone(),
            probability: prediction.probability,
            response,
        })
    }

    /// Classify `utterance` and pick a response, falling back when no intent is confident.
    pub fn reply(&self, utterance: &str) -> Result<Reply> {
        match self.reply_strict(utterance) {
            Err(WayfarerError::NoConfidentIntent) => {
                warn!("No confident intent for {utterance:?}, using fallback response");
                Ok(Reply::Fallback {
                    response: self.fallback_response.clone(),
                })
            }
            other => other,
        }
    }

    /// The response text for `utterance`.
    ///
    /// Never fails for lack of a confident intent; `UnknownIntent`,
    /// `ShapeMismatch`, and (under the `reject` policy) `EmptyInput` propagate.
    pub fn respond(&self, utterance: &str) -> Result<String> {
        self.reply(utterance).map(Reply::into_response)
    }

    /// Classifier labels with no record in the intent table.
    pub fn labels_without_intents(&self) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|label| !self.intents.contains(label))
            .map(String::as_str)
            .collect()
    }

    /// The encoder built from the vocabulary artifact.
    pub fn encoder(&self) -> &BagOfWordsEncoder {
        &self.encoder
    }

    /// Class labels in classifier output order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The intent table responses are drawn from.
    pub fn intents(&self) -> &IntentTable {
        &self.intents
    }

    /// Probability a class must exceed to be ranked.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Reply used when no intent clears the threshold.
    pub fn fallback_response(&self) -> &str {
        &self.fallback_response
    }
}

fn check_artifacts_agree(
    network: &DenseNetwork,
    metadata: &ModelMetadata,
    model_path: &Path,
) -> Result<()> {
    if network.input_size() != metadata.vocabulary_size() {
        return Err(WayfarerError::model_load(
            model_path.display().to_string(),
            format!(
                "classifier expects {} features but the vocabulary has {} words",
                network.input_size(),
                metadata.vocabulary_size()
            ),
        ));
    }
    if network.output_size() != metadata.num_classes() {
        return Err(WayfarerError::model_load(
            model_path.display().to_string(),
            format!(
                "classifier produces {} scores but there are {} labels",
                network.output_size(),
                metadata.num_classes()
            ),
        ));
    }
    Ok(())
}

//! Pre-trained intent scoring models.
//!
//! The chatbot only needs one capability from a model: turn a feature vector
//! of length V into a score vector of length C. [`IntentModel`] is that seam,
//! and anything implementing it (a neural network, a lookup table, a test
//! double) can be plugged into [`Chatbot`](crate::chatbot::Chatbot).
//!
//! [`DenseNetwork`] is the concrete model shipped with the crate: a stack of
//! fully connected layers, evaluated in inference mode only.
//!
//! # Examples
//!
//! ```
//! use wayfarer::ml::classifier::{Activation, DenseLayer, DenseNetwork, IntentModel};
//!
//! // 2 features → 2 classes, feature i votes for class i.
//! let layer = DenseLayer::new(
//!     vec![vec![4.0, 0.0], vec![0.0, 4.0]],
//!     vec![0.0, 0.0],
//!     Activation::Softmax,
//! )
//! .unwrap();
//! let network = DenseNetwork::new(vec![layer]).unwrap();
//!
//! let probabilities = network.predict(&[1.0, 0.0]).unwrap();
//! assert!(probabilities[0] > 0.9);
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WayfarerError};
use crate::ml::{read_artifact, write_artifact};

/// A side-effect-free scoring function from features to class scores.
pub trait IntentModel: Send + Sync {
    /// Score a feature vector; the result has one entry per intent label.
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>>;

    /// Expected feature vector length (V).
    fn input_size(&self) -> usize;

    /// Length of the returned score vector (C).
    fn output_size(&self) -> usize;

    /// Get the name of this model (for logging).
    fn name(&self) -> &'static str;
}

/// Element-wise (or, for softmax, vector-wise) layer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    /// Apply the activation in place.
    pub fn apply(self, values: &mut [f32]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => values
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Softmax => {
                let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let mut sum = 0.0f32;
                for v in values.iter_mut() {
                    *v = (*v - max).exp();
                    sum += *v;
                }
                if sum > 0.0 {
                    for v in values.iter_mut() {
                        *v /= sum;
                    }
                }
            }
        }
    }
}

/// A fully connected layer: `activation(input · weights + bias)`.
///
/// `weights` is row-major with one row per input and one column per output,
/// the layout Keras `Dense.get_weights()` exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

impl DenseLayer {
    /// Create a validated layer.
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>, activation: Activation) -> Result<Self> {
        let layer = DenseLayer {
            weights,
            bias,
            activation,
        };
        layer.check().map_err(WayfarerError::invalid_argument)?;
        Ok(layer)
    }

    /// Number of inputs this layer consumes.
    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    /// Number of outputs this layer produces.
    pub fn output_size(&self) -> usize {
        self.bias.len()
    }

    /// Evaluate the layer. `input.len()` must equal [`input_size`](Self::input_size).
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut output = self.bias.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            // Bag-of-words inputs are mostly zero.
            if *x == 0.0 {
                continue;
            }
            for (out, w) in output.iter_mut().zip(row) {
                *out += x * w;
            }
        }
        self.activation.apply(&mut output);
        output
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.bias.is_empty() {
            return Err("layer has no outputs".to_string());
        }
        if let Some((i, row)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.bias.len())
        {
            return Err(format!(
                "weight row {i} has {} columns, expected {}",
                row.len(),
                self.bias.len()
            ));
        }
        let finite = self.bias.iter().all(|v| v.is_finite())
            && self.weights.iter().flatten().all(|v| v.is_finite());
        if !finite {
            return Err("layer contains non-finite parameters".to_string());
        }
        Ok(())
    }
}

/// A feed-forward network of dense layers, loaded once and never trained here.
///
/// Dropout layers from training are the identity at inference time and are
/// simply absent from the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Create a validated network; consecutive layer shapes must chain.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        let network = DenseNetwork { layers };
        network.check().map_err(WayfarerError::invalid_argument)?;
        Ok(network)
    }

    /// Load the classifier artifact (JSON or bincode) and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let network: DenseNetwork = read_artifact(path)?;
        network
            .check()
            .map_err(|reason| WayfarerError::model_load(path.display().to_string(), reason))?;

        info!(
            "Loaded classifier from {}: {} layers, {} inputs, {} outputs",
            path.display(),
            network.layers.len(),
            network.input_size(),
            network.output_size()
        );
        Ok(network)
    }

    /// Write the classifier artifact in the format implied by the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_artifact(self, path)
    }

    /// The layers in evaluation order.
    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.layers.is_empty() {
            return Err("network has no layers".to_string());
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if let Err(reason) = layer.check() {
                return Err(format!("layer {i}: {reason}"));
            }
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].output_size() != pair[1].input_size() {
                return Err(format!(
                    "layer {i} produces {} values but layer {} expects {}",
                    pair[0].output_size(),
                    i + 1,
                    pair[1].input_size()
                ));
            }
        }
        Ok(())
    }
}

impl IntentModel for DenseNetwork {
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>> {
        if features.len() != self.input_size() {
            return Err(WayfarerError::shape_mismatch(
                self.input_size(),
                features.len(),
            ));
        }

        let mut activations = features.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        Ok(activations)
    }

    fn input_size(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_size)
    }

    fn output_size(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_size)
    }

    fn name(&self) -> &'static str {
        "dense_network"
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::error::{MlpError, Result};

/// Output-layer transform. Softmax is the only supported kind; anything else
/// is rejected at the string-selection boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayer {
    Softmax,
}

/// Training loss. Cross-entropy (paired with softmax) is the only supported
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    CrossEntropy,
}

impl FromStr for OutputLayer {
    type Err = MlpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "softmax" => Ok(OutputLayer::Softmax),
            other => Err(MlpError::Config(format!(
                "only the 'softmax' output layer is supported, got '{other}'"
            ))),
        }
    }
}

impl FromStr for LossKind {
    type Err = MlpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cross_entropy" => Ok(LossKind::CrossEntropy),
            other => Err(MlpError::Config(format!(
                "only the 'cross_entropy' loss is supported, got '{other}'"
            ))),
        }
    }
}

/// Hyperparameters for an `Mlp`, fixed at construction.
///
/// # Fields
/// - `input_size`        — feature count per sample
/// - `output_size`       — class count
/// - `hidden_layer_size` — one width per hidden layer, in order; non-empty
/// - `batch_size`        — samples per mini-batch
/// - `activation`        — hidden-layer activation
/// - `output_layer`      — output transform (softmax)
/// - `loss`              — loss kind (cross-entropy)
/// - `lr`                — learning rate for the plain gradient-descent update
/// - `reg_lambda`        — L2 coefficient; enters the reported loss only,
///                         never the weight update
/// - `momentum`          — accepted for completeness; the update rule does
///                         not apply it
/// - `verbose`           — logging interval in epochs, at least 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpConfig {
    pub input_size: usize,
    pub output_size: usize,
    pub hidden_layer_size: Vec<usize>,
    pub batch_size: usize,
    pub activation: Activation,
    pub output_layer: OutputLayer,
    pub loss: LossKind,
    pub lr: f64,
    pub reg_lambda: f64,
    pub momentum: f64,
    pub verbose: usize,
}

impl MlpConfig {
    /// Configuration with the stock defaults: one hidden layer of 128,
    /// batch size 200, sigmoid activation, lr 0.001, reg 0.0001,
    /// momentum 0.9, logging every epoch.
    pub fn new(input_size: usize, output_size: usize) -> MlpConfig {
        MlpConfig {
            input_size,
            output_size,
            hidden_layer_size: vec![128],
            batch_size: 200,
            activation: Activation::Sigmoid,
            output_layer: OutputLayer::Softmax,
            loss: LossKind::CrossEntropy,
            lr: 0.001,
            reg_lambda: 0.0001,
            momentum: 0.9,
            verbose: 1,
        }
    }

    pub fn with_hidden_layers(mut self, sizes: Vec<usize>) -> MlpConfig {
        self.hidden_layer_size = sizes;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> MlpConfig {
        self.batch_size = batch_size;
        self
    }

    pub fn with_activation(mut self, activation: Activation) -> MlpConfig {
        self.activation = activation;
        self
    }

    pub fn with_learning_rate(mut self, lr: f64) -> MlpConfig {
        self.lr = lr;
        self
    }

    pub fn with_reg_lambda(mut self, reg_lambda: f64) -> MlpConfig {
        self.reg_lambda = reg_lambda;
        self
    }

    pub fn with_verbose(mut self, verbose: usize) -> MlpConfig {
        self.verbose = verbose;
        self
    }

    /// Checks the structural invariants: hidden-layer list non-empty, every
    /// size positive, logging interval at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.hidden_layer_size.is_empty() {
            return Err(MlpError::Config(
                "hidden_layer_size must name at least one hidden layer".to_owned(),
            ));
        }
        if self.input_size == 0 || self.output_size == 0 {
            return Err(MlpError::Config(
                "input_size and output_size must be positive".to_owned(),
            ));
        }
        if self.hidden_layer_size.iter().any(|&s| s == 0) {
            return Err(MlpError::Config(
                "every hidden layer size must be positive".to_owned(),
            ));
        }
        if self.batch_size == 0 {
            return Err(MlpError::Config("batch_size must be positive".to_owned()));
        }
        if self.verbose == 0 {
            return Err(MlpError::Config(
                "verbose (logging interval) must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes the configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a configuration from a JSON file written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<MlpConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MlpError;
use crate::math::matrix::Matrix;

/// Hidden-layer activation function.
///
/// The closed set of supported activations; selection by name goes through
/// `FromStr` so an unsupported name is a configuration error, not a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Sigmoid,
    Tanh,
}

impl Activation {
    /// Element-wise activation of a pre-activation value.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => 2.0 / (1.0 + (-2.0 * x).exp()) - 1.0,
        }
    }

    /// Derivative as the backward pass evaluates it: `v` is the stored
    /// post-activation value of the layer.
    ///
    /// The two variants deliberately follow different conventions:
    /// - `Sigmoid` uses the self-referential identity `a * (1 - a)` on the
    ///   activation value directly.
    /// - `Tanh` computes `1 - tanh(v)^2`, re-applying tanh to whatever it is
    ///   handed. Since `v` is already `tanh(net)`, the tanh runs twice.
    pub fn derivative(&self, v: f64) -> f64 {
        match self {
            Activation::Sigmoid => v * (1.0 - v),
            Activation::Tanh => {
                let t = self.function(v);
                1.0 - t * t
            }
        }
    }

    /// Uniform initialization bound for a weight matrix with the given
    /// fan-in/fan-out, scaled per activation.
    pub fn init_bound(&self, fan_in: usize, fan_out: usize) -> f64 {
        let fan_sum = (fan_in + fan_out) as f64;
        match self {
            Activation::Sigmoid => (2.0 / fan_sum).sqrt(),
            Activation::Tanh => (6.0 / fan_sum).sqrt(),
        }
    }
}

impl FromStr for Activation {
    type Err = MlpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            other => Err(MlpError::Config(format!(
                "only 'sigmoid' and 'tanh' activations are supported, got '{other}'"
            ))),
        }
    }
}

/// Row-wise softmax over a batch: each row is exponentiated and divided by
/// its own sum.
///
/// There is no max-subtraction stability shift; large logits overflow to
/// infinity and the row degenerates to NaN. Callers get the non-finite
/// values as-is.
pub fn softmax(net: &Matrix) -> Matrix {
    let data = net
        .data
        .iter()
        .map(|row| {
            let exps: Vec<f64> = row.iter().map(|&x| x.exp()).collect();
            let sum: f64 = exps.iter().sum();
            exps.into_iter().map(|e| e / sum).collect()
        })
        .collect();
    Matrix::from_rows(data)
}

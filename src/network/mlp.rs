use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::activation::softmax;
use crate::error::{MlpError, Result};
use crate::loss::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::config::MlpConfig;
use crate::train::epoch_stats::EpochStats;

/// Seed for the per-`fit` RNG. Fixed so that a full `fit` call (weight
/// initialization and epoch shuffling) is reproducible for identical
/// configuration and data.
const FIT_SEED: u64 = 1;

/// Batched multilayer perceptron with a softmax output layer, trained by
/// plain mini-batch gradient descent.
///
/// Parameters are created lazily on the first `fit` call and then persist,
/// accumulating updates across all subsequent epochs and `fit` calls.
/// Activation and delta buffers are scratch state overwritten every batch.
///
/// An instance owns all of its mutable state; train independent instances
/// for independent models.
#[derive(Debug)]
pub struct Mlp {
    config: MlpConfig,
    /// One weight matrix per layer transition, `(fan_in, fan_out)` each.
    weights: Vec<Matrix>,
    /// One bias vector per layer transition. Initialized alongside the
    /// weights; the update rule never touches them afterwards.
    biases: Vec<Vec<f64>>,
    /// Per-layer activations of the most recent forward pass, input included.
    layers: Vec<Matrix>,
    /// Per-layer error signals of the most recent backward pass.
    deltas: Vec<Matrix>,
}

impl Mlp {
    /// Validates `config` and constructs an untrained engine. No parameter
    /// state is allocated until the first `fit`.
    pub fn new(config: MlpConfig) -> Result<Mlp> {
        config.validate()?;
        Ok(Mlp {
            config,
            weights: Vec::new(),
            biases: Vec::new(),
            layers: Vec::new(),
            deltas: Vec::new(),
        })
    }

    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    /// Weight matrices in topological order; empty before the first `fit`.
    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    /// Bias vectors in topological order; empty before the first `fit`.
    pub fn biases(&self) -> &[Vec<f64>] {
        &self.biases
    }

    /// Allocates weights, biases and scratch buffers. Weight entries are
    /// drawn row-major, then the bias entries, one layer transition at a
    /// time in topological order, so the RNG state fully determines the
    /// initial parameters.
    fn init_parameters(&mut self, n_features: usize, rng: &mut StdRng) {
        let hidden = &self.config.hidden_layer_size;
        let activation = self.config.activation;

        let mut fan_in = n_features;
        for &fan_out in hidden.iter().chain(std::iter::once(&self.config.output_size)) {
            let bound = activation.init_bound(fan_in, fan_out);
            self.weights.push(Matrix::uniform(fan_in, fan_out, bound, rng));
            self.biases
                .push((0..fan_out).map(|_| rng.gen_range(-bound..bound)).collect());
            fan_in = fan_out;
        }

        // Scratch buffers, arena-style: sized once here, overwritten per batch.
        let batch = self.config.batch_size;
        self.layers.push(Matrix::zeros(batch, self.config.input_size));
        for &size in hidden {
            self.layers.push(Matrix::zeros(batch, size));
            self.deltas.push(Matrix::zeros(batch, size));
        }
        self.layers.push(Matrix::zeros(batch, self.config.output_size));
        self.deltas.push(Matrix::zeros(batch, self.config.output_size));
    }

    /// Forward pass over a batch. `x` may have fewer rows than the
    /// configured batch size (trailing partial batch).
    ///
    /// Overwrites the engine's activation buffers — the only side effect —
    /// and returns the output activations, one class-probability row per
    /// input row.
    ///
    /// # Panics
    /// Panics if called before the first `fit` has initialized parameters.
    pub fn forward(&mut self, x: &Matrix) -> Matrix {
        assert!(
            !self.weights.is_empty(),
            "forward called before fit initialized the parameters"
        );

        let n_hidden = self.config.hidden_layer_size.len();
        let activation = self.config.activation;
        self.layers[0] = x.clone();

        for i in 1..=n_hidden {
            let net = self.layers[i - 1]
                .dot(&self.weights[i - 1])
                .add_row(&self.biases[i - 1]);
            self.layers[i] = net.map(|v| activation.function(v));
        }

        let net = self.layers[n_hidden]
            .dot(&self.weights[n_hidden])
            .add_row(&self.biases[n_hidden]);
        self.layers[n_hidden + 1] = softmax(&net);

        self.layers[n_hidden + 1].clone()
    }

    /// Backward pass for the batch `forward` was just called on; the
    /// activation buffers must still hold that batch's values.
    ///
    /// Computes the combined softmax/cross-entropy output delta, propagates
    /// it through the hidden layers against the stored post-activation
    /// values, and applies the gradient-descent weight update in place from
    /// the output transition backwards. Biases receive no update, and
    /// neither the momentum coefficient nor the L2 term enters the step.
    fn backward(&mut self, labels: &[usize]) {
        let n_hidden = self.config.hidden_layer_size.len();

        // δ_out = softmax output with 1 subtracted at each true-label column.
        let mut delta = self.layers[n_hidden + 1].clone();
        for (row, &label) in labels.iter().enumerate() {
            delta.data[row][label] -= 1.0;
        }
        self.deltas[n_hidden] = delta;

        let activation = self.config.activation;
        for i in (1..=n_hidden).rev() {
            let local = self.layers[i].map(|v| activation.derivative(v));
            let propagated = self.deltas[i].dot(&self.weights[i].transpose());
            self.deltas[i - 1] = propagated.hadamard(&local);
        }

        let lr = self.config.lr;
        for i in (0..=n_hidden).rev() {
            let grad = self.layers[i].transpose().dot(&self.deltas[i]);
            let updated = self.weights[i].sub(&grad.scale(lr));
            self.weights[i] = updated;
        }
    }

    /// Trains on `x` (one sample per row) and `y` (one class index per
    /// sample) for `max_epochs` epochs, optionally reshuffling the data
    /// each epoch. Returns `self` so calls can be chained; the engine is
    /// mutated in place.
    ///
    /// Parameters are initialized on the first call only; later calls keep
    /// training the same parameters. Every `verbose` epochs the
    /// full-dataset loss and accuracy are recomputed and logged.
    pub fn fit(
        &mut self,
        x: &Matrix,
        y: &[usize],
        max_epochs: usize,
        shuffle_data: bool,
    ) -> Result<&mut Mlp> {
        let n_samples = x.rows;
        if y.len() != n_samples {
            return Err(MlpError::Shape(format!(
                "x has {} rows but y has {} labels",
                n_samples,
                y.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(FIT_SEED);
        if self.weights.is_empty() {
            self.init_parameters(x.cols, &mut rng);
        }

        let mut x_cur = x.clone();
        let mut y_cur = y.to_vec();

        for epoch in 0..max_epochs {
            if shuffle_data {
                let mut order: Vec<usize> = (0..n_samples).collect();
                order.shuffle(&mut rng);
                x_cur = x_cur.select_rows(&order);
                y_cur = order.iter().map(|&i| y_cur[i]).collect();
            }

            let mut start = 0;
            while start < n_samples {
                let end = (start + self.config.batch_size).min(n_samples);
                let batch = x_cur.slice_rows(start..end);
                self.forward(&batch);
                self.backward(&y_cur[start..end]);
                start = end;
            }

            if epoch % self.config.verbose == 0 {
                // Full-dataset re-evaluation; expensive by design.
                let loss = self.compute_loss(&x_cur, &y_cur);
                let accuracy = self.score(&x_cur, &y_cur);
                info!("{}", EpochStats { epoch, loss, accuracy });
            }
        }

        Ok(self)
    }

    /// Loss over a dataset: the batch data-loss expression plus the L2
    /// penalty over every weight matrix, divided by the sample count.
    pub fn compute_loss(&mut self, x: &Matrix, y: &[usize]) -> f64 {
        let n_samples = x.rows;
        let probs = self.forward(x);
        let data_loss = CrossEntropyLoss::data_loss(&probs, y)
            + CrossEntropyLoss::l2_penalty(&self.weights, self.config.reg_lambda);
        data_loss / n_samples as f64
    }

    /// Class-probability rows for `x`. A pure function of the current
    /// parameters and input: no state changes beyond the documented
    /// activation-buffer overwrites.
    ///
    /// # Panics
    /// Panics if called before the first `fit`.
    pub fn predict(&mut self, x: &Matrix) -> Matrix {
        self.forward(x)
    }

    /// Accuracy in `[0, 1]`: fraction of rows whose argmax class matches
    /// the label.
    pub fn score(&mut self, x: &Matrix, y: &[usize]) -> f64 {
        let n_samples = x.rows;
        let probs = self.forward(x);
        let correct = probs
            .data
            .iter()
            .zip(y.iter())
            .filter(|(row, &label)| argmax(row) == label)
            .count();
        correct as f64 / n_samples as f64
    }
}

/// Index of the maximum element in a slice; ties keep the earliest index.
fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in row.iter().enumerate().skip(1) {
        if value > row[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Matrix, Vec<usize>) {
        let x = Matrix::from_rows(vec![
            vec![0.0, 0.1],
            vec![0.1, 0.0],
            vec![0.9, 1.0],
            vec![1.0, 0.9],
        ]);
        (x, vec![0, 0, 1, 1])
    }

    #[test]
    fn weight_shapes_follow_layer_transitions() {
        let config = MlpConfig::new(3, 2)
            .with_hidden_layers(vec![5, 4])
            .with_batch_size(4);
        let mut mlp = Mlp::new(config).unwrap();
        let x = Matrix::zeros(4, 3);
        mlp.fit(&x, &[0, 1, 0, 1], 1, false).unwrap();

        let shapes: Vec<(usize, usize)> =
            mlp.weights().iter().map(|w| (w.rows, w.cols)).collect();
        assert_eq!(shapes, vec![(3, 5), (5, 4), (4, 2)]);
        assert_eq!(mlp.weights().len(), 3); // hidden count + 1

        let bias_lens: Vec<usize> = mlp.biases().iter().map(|b| b.len()).collect();
        assert_eq!(bias_lens, vec![5, 4, 2]);
    }

    #[test]
    fn parameters_initialized_once_across_fits() {
        let (x, y) = toy_data();
        let config = MlpConfig::new(2, 2).with_hidden_layers(vec![4]).with_batch_size(2);
        let mut mlp = Mlp::new(config).unwrap();

        mlp.fit(&x, &y, 1, false).unwrap();
        let after_first = mlp.weights().to_vec();
        mlp.fit(&x, &y, 1, false).unwrap();
        // Second fit keeps training the same store instead of re-appending.
        assert_eq!(mlp.weights().len(), 2);
        assert_ne!(mlp.weights(), &after_first[..]);
    }

    #[test]
    #[should_panic]
    fn forward_before_fit_panics() {
        let config = MlpConfig::new(2, 2).with_hidden_layers(vec![4]);
        let mut mlp = Mlp::new(config).unwrap();
        let x = Matrix::zeros(1, 2);
        mlp.forward(&x);
    }

    #[test]
    fn argmax_picks_first_of_equal_maxima() {
        assert_eq!(argmax(&[0.1, 0.8, 0.1]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.7, 0.7, 0.1]), 1);
        assert_eq!(argmax(&[1.0]), 0);
    }
}

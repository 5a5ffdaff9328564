use crate::math::matrix::Matrix;

/// The training loss paired with the softmax output layer.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// Summed data loss over a batch of softmax probabilities and raw
    /// integer labels:
    ///
    ///   Σ_j Σ_i [ -y_i · ln(a_ij) - (1 - y_i) · ln(1 - a_ij) ]
    ///
    /// This is a binary-cross-entropy-shaped expression applied to the
    /// integer labels themselves, not to a one-hot encoding. `ln` of a
    /// saturated probability yields a non-finite value that propagates to
    /// the caller.
    pub fn data_loss(probs: &Matrix, labels: &[usize]) -> f64 {
        assert_eq!(probs.rows, labels.len(), "one label per probability row");
        let mut total = 0.0;
        for j in 0..probs.cols {
            for (i, &label) in labels.iter().enumerate() {
                let y = label as f64;
                let a = probs.data[i][j];
                total += -y * a.ln() - (1.0 - y) * (1.0 - a).ln();
            }
        }
        total
    }

    /// L2 penalty `0.5 · reg_lambda · Σ w²` summed over every weight matrix.
    ///
    /// The penalty only enters the reported loss; the weight update carries
    /// no corresponding gradient term.
    pub fn l2_penalty(weights: &[Matrix], reg_lambda: f64) -> f64 {
        weights
            .iter()
            .map(|w| {
                let sq: f64 = w.data.iter().flatten().map(|&x| x * x).sum();
                0.5 * reg_lambda * sq
            })
            .sum()
    }
}

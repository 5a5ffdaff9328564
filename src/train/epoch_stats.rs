use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-epoch training statistics logged by `Mlp::fit`.
///
/// Emitted through the `log` facade at the configured interval; the text
/// format is informational, not a compatibility contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch index.
    pub epoch: usize,
    /// Full-dataset loss (data loss plus L2 penalty, per sample).
    pub loss: f64,
    /// Full-dataset training accuracy as a fraction in [0, 1].
    pub accuracy: f64,
}

impl fmt::Display for EpochStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch {}: loss = {}, accuracy = {}",
            self.epoch, self.loss, self.accuracy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reports_epoch_loss_accuracy() {
        let stats = EpochStats {
            epoch: 3,
            loss: 0.5,
            accuracy: 0.75,
        };
        assert_eq!(stats.to_string(), "epoch 3: loss = 0.5, accuracy = 0.75");
    }
}

pub mod activation;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::{softmax, Activation};
pub use error::{MlpError, Result};
pub use loss::CrossEntropyLoss;
pub use math::matrix::Matrix;
pub use network::config::{LossKind, MlpConfig, OutputLayer};
pub use network::mlp::Mlp;
pub use train::epoch_stats::EpochStats;

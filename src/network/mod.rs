pub mod config;
pub mod mlp;

pub use config::{LossKind, MlpConfig, OutputLayer};
pub use mlp::Mlp;

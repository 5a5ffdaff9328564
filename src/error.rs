use std::fmt;

/// Errors surfaced by the public engine API.
///
/// - `Config` — unsupported or inconsistent hyperparameters, raised before
///   any engine state is allocated.
/// - `Shape`  — mismatched sample counts between features and labels, raised
///   at the start of `fit`.
///
/// Numerical issues (softmax overflow, log of a saturated probability) are
/// not errors; they propagate as non-finite floats.
#[derive(Debug, Clone, PartialEq)]
pub enum MlpError {
    Config(String),
    Shape(String),
}

pub type Result<T> = std::result::Result<T, MlpError>;

impl fmt::Display for MlpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlpError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            MlpError::Shape(msg) => write!(f, "shape mismatch: {msg}"),
        }
    }
}

impl std::error::Error for MlpError {}

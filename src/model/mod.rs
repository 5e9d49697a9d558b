//! Inference-only counterparts of the trained artifacts.
//!
//! The training pipeline lives elsewhere; this module only knows how to
//! deserialize a fitted random forest, standard scaler and label encoder
//! and run their `predict` / `transform` / `decode` operations.

mod encoder;
mod forest;
mod scaler;

pub use encoder::LabelEncoder;
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use scaler::StandardScaler;

/// Errors raised by the inference structures themselves.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("feature count mismatch: expected {expected}, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },
    #[error("class index {index} out of range (model has {n_classes} classes)")]
    ClassOutOfRange { index: usize, n_classes: usize },
    #[error("artifact is empty or inconsistent: {0}")]
    InvalidArtifact(String),
}

pub mod builder;
mod error;
#[allow(clippy::module_inception)]
mod predictor;

pub use builder::PredictorBuilder;
pub use error::PredictorError;
pub use predictor::{Prediction, Predictor};

/// Information about the current state and configuration of a predictor
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Path to the serialized forest file
    pub forest_path: String,
    /// Path to the serialized scaler file
    pub scaler_path: String,
    /// Path to the serialized encoder file
    pub encoder_path: String,
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Length of the feature vector the forest consumes
    pub n_features: usize,
    /// Number of outcome classes
    pub n_classes: usize,
    /// Decoded labels of the outcome classes, in code order
    pub class_labels: Vec<String>,
}
